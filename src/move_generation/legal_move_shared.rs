use crate::game_state::chess_types::*;
use crate::game_state::game_state::Position;

/// Turns attacked squares into moves: empty targets become quiet moves,
/// enemy-occupied targets become captures, own pieces are skipped.
pub fn push_step_or_capture(
    position: &Position,
    from: Square,
    piece: Piece,
    targets: impl IntoIterator<Item = Square>,
    out: &mut Vec<Move>,
) {
    for to in targets {
        match position.piece_at(to) {
            None => out.push(Move::quiet_or_capture(from, to, piece, None)),
            Some(occupant) if occupant.color != piece.color => {
                out.push(Move::quiet_or_capture(from, to, piece, Some(occupant)))
            }
            Some(_) => {}
        }
    }
}

#[inline]
pub fn enemy_piece_on(position: &Position, square: Square, own: Color) -> Option<Piece> {
    position.piece_at(square).filter(|piece| piece.color != own)
}
