//! Board rendering for the Gomoku GUI

use crate::{Board, Pos, Stone};
use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use super::theme::*;

/// Screen geometry of the intersections: where line 0 sits and how far apart lines are
#[derive(Debug, Clone, Copy, PartialEq)]
struct Grid {
    origin: Pos2,
    cell: f32,
    lines: usize,
}

impl Grid {
    fn fit(rect: Rect, lines: usize) -> Self {
        let lines = lines.max(2);
        Self {
            origin: rect.min + Vec2::splat(BOARD_MARGIN),
            cell: (rect.width() - 2.0 * BOARD_MARGIN) / (lines as f32 - 1.0),
            lines,
        }
    }

    fn point(&self, row: usize, col: usize) -> Pos2 {
        self.origin + Vec2::new(col as f32, row as f32) * self.cell
    }

    fn center(&self, pos: Pos) -> Pos2 {
        self.point(usize::from(pos.row), usize::from(pos.col))
    }

    /// Nearest intersection within half a cell, if on the board
    fn snap(&self, screen: Pos2) -> Option<Pos> {
        let offset = (screen - self.origin) / self.cell + Vec2::splat(0.5);
        let (col, row) = (offset.x.floor(), offset.y.floor());
        let limit = self.lines as f32;
        if (0.0..limit).contains(&col) && (0.0..limit).contains(&row) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    fn stone_radius(&self) -> f32 {
        self.cell * STONE_RADIUS_RATIO
    }
}

/// How each colour is painted
struct StoneLook {
    fill: Color32,
    shadow: Color32,
    ghost: Color32,
}

fn look(stone: Stone) -> Option<StoneLook> {
    match stone {
        Stone::Black => Some(StoneLook {
            fill: BLACK_STONE,
            shadow: Color32::from_black_alpha(60),
            ghost: Color32::from_rgba_unmultiplied(20, 20, 20, 80),
        }),
        Stone::White => Some(StoneLook {
            fill: WHITE_STONE,
            shadow: Color32::from_black_alpha(40),
            ghost: Color32::from_rgba_unmultiplied(240, 240, 240, 80),
        }),
        Stone::Empty => None,
    }
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    grid: Grid,
    rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            grid: Grid {
                origin: Pos2::ZERO,
                cell: 30.0,
                lines: crate::BOARD_SIZE,
            },
            rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Paint the position; returns the empty cell the user clicked, if any
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        current_turn: Stone,
        last_move: Option<Pos>,
        winning_line: &[Pos],
        accepts_input: bool,
    ) -> Option<Pos> {
        let available = ui.available_size();
        let side = available.x.min(available.y) - 20.0;
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::click());

        self.rect = response.rect;
        self.grid = Grid::fit(self.rect, board.size());

        painter.rect_filled(self.rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_coordinates(&painter);
        for (pos, stone) in board.occupied() {
            self.draw_stone(&painter, pos, stone);
        }
        if let Some(pos) = last_move {
            painter.circle_filled(self.grid.center(pos), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }
        if winning_line.len() > 1 {
            self.draw_winning_line(&painter, winning_line);
        }

        if !accepts_input {
            return None;
        }
        let hovered = response.hover_pos().and_then(|p| self.grid.snap(p))?;
        let free = board.is_empty(hovered);
        self.draw_hover_preview(&painter, hovered, current_turn, free);
        (free && response.clicked()).then_some(hovered)
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let last = self.grid.lines - 1;

        for i in 0..self.grid.lines {
            painter.line_segment([self.grid.point(0, i), self.grid.point(last, i)], stroke);
            painter.line_segment([self.grid.point(i, 0), self.grid.point(i, last)], stroke);
        }
        for (row, col) in star_points(self.grid.lines) {
            painter.circle_filled(self.grid.point(row, col), STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// Column letters along the top and bottom, row indices down the sides
    fn draw_coordinates(&self, painter: &Painter) {
        let font = FontId::proportional(12.0);
        let (top, bottom) = (self.rect.min.y + 12.0, self.rect.max.y - 12.0);
        let (left, right) = (self.rect.min.x + 12.0, self.rect.max.x - 12.0);

        for i in 0..self.grid.lines {
            let at = self.grid.point(i, i);
            let letter = char::from(b'A' + (i % 26) as u8).to_string();
            let number = i.to_string();

            for y in [top, bottom] {
                painter.text(Pos2::new(at.x, y), Align2::CENTER_CENTER, &letter, font.clone(), GRID_LINE);
            }
            for x in [left, right] {
                painter.text(Pos2::new(x, at.y), Align2::CENTER_CENTER, &number, font.clone(), GRID_LINE);
            }
        }
    }

    fn draw_stone(&self, painter: &Painter, pos: Pos, stone: Stone) {
        let Some(look) = look(stone) else {
            return;
        };
        let center = self.grid.center(pos);
        let r = self.grid.stone_radius();

        painter.circle_filled(center + Vec2::splat(2.0), r, look.shadow);
        painter.circle_filled(center, r, look.fill);
        if stone == Stone::Black {
            painter.circle_filled(center - Vec2::splat(r * 0.3), r * 0.2, BLACK_STONE_HIGHLIGHT);
        } else {
            painter.circle_stroke(center, r * 0.85, Stroke::new(r * 0.1, WHITE_STONE_SHADOW));
        }
    }

    /// Connect the winning stones and ring each one
    fn draw_winning_line(&self, painter: &Painter, line: &[Pos]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);
        let ring = self.grid.stone_radius() + 3.0;

        for pair in line.windows(2) {
            painter.line_segment([self.grid.center(pair[0]), self.grid.center(pair[1])], stroke);
        }
        for &pos in line {
            painter.circle_stroke(self.grid.center(pos), ring, stroke);
        }
    }

    fn draw_hover_preview(&self, painter: &Painter, pos: Pos, turn: Stone, free: bool) {
        let color = match (free, look(turn)) {
            (true, Some(look)) => look.ghost,
            (true, None) => return,
            (false, _) => hover_invalid(),
        };
        painter.circle_filled(self.grid.center(pos), self.grid.stone_radius(), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(lines: usize) -> Grid {
        // 2 * margin + 9 cells of 40px
        let side = 2.0 * BOARD_MARGIN + 9.0 * 40.0;
        Grid::fit(Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::splat(side)), lines)
    }

    #[test]
    fn test_grid_fits_rect() {
        let g = grid(10);
        assert_eq!(g.cell, 40.0);
        assert_eq!(g.center(Pos::new(0, 0)), Pos2::new(100.0 + BOARD_MARGIN, 50.0 + BOARD_MARGIN));
        assert_eq!(g.center(Pos::new(9, 9)), g.origin + Vec2::splat(360.0));
    }

    #[test]
    fn test_snap_to_nearest_intersection() {
        let g = grid(10);
        for pos in [Pos::new(0, 0), Pos::new(3, 7), Pos::new(9, 9)] {
            let c = g.center(pos);
            assert_eq!(g.snap(c), Some(pos));
            assert_eq!(g.snap(c + Vec2::new(19.0, -19.0)), Some(pos));
        }
        // Half a cell beyond the outer lines is off the board
        assert_eq!(g.snap(g.origin - Vec2::splat(21.0)), None);
        assert_eq!(g.snap(g.center(Pos::new(9, 9)) + Vec2::new(0.0, 21.0)), None);
    }

    #[test]
    fn test_tiny_board_keeps_two_lines() {
        let g = grid(1);
        assert_eq!(g.lines, 2);
        assert!(g.cell.is_finite());
    }

    #[test]
    fn test_empty_has_no_look() {
        assert!(look(Stone::Empty).is_none());
        assert_eq!(look(Stone::Black).map(|l| l.fill), Some(BLACK_STONE));
    }
}
