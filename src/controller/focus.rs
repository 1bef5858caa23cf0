use gilrs::Button;

use crate::models::{ContainerID, MovieID};

pub type FocusID = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// For focus, we only handle these actions.
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn as_dir_vector(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecialHandlerAction {
    JumpRowStart, // Left shoulder.
    JumpRowEnd,   // Right shoulder.
}

fn special_action(b: Button) -> Option<SpecialHandlerAction> {
    match b {
        Button::LeftTrigger => Some(SpecialHandlerAction::JumpRowStart),
        Button::RightTrigger => Some(SpecialHandlerAction::JumpRowEnd),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub enum NavigationDirective {
    Button(Button),
    Direction(Direction),
}

impl NavigationDirective {
    /// D-pad buttons become directions, the rest stay buttons.
    pub fn from_button(b: Button) -> Self {
        match b {
            Button::DPadUp => NavigationDirective::Direction(Direction::Up),
            Button::DPadDown => NavigationDirective::Direction(Direction::Down),
            Button::DPadLeft => NavigationDirective::Direction(Direction::Left),
            Button::DPadRight => NavigationDirective::Direction(Direction::Right),
            other => NavigationDirective::Button(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationResult {
    /// Moved within the same row.
    WithinRow(FocusID),
    /// Moved to another row.
    AcrossRows(FocusID),
    /// Terminal.
    NoNextItem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Something focusable on the home screen.
pub struct FocusCell {
    pub id: FocusID,
    /// None for the hero.
    pub row: Option<ContainerID>,
    pub movie_id: MovieID,
}

impl FocusCell {
    pub fn hero(movie_id: &str) -> Self {
        Self {
            id: format!("HERO@{}", movie_id),
            row: None,
            movie_id: movie_id.to_owned(),
        }
    }

    pub fn card(row_id: &str, movie_id: &str) -> Self {
        Self {
            id: format!("{}@{}", row_id, movie_id),
            row: Some(row_id.to_owned()),
            movie_id: movie_id.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Point {
    row: usize,
    col: usize,
}

#[derive(Debug, Clone, Default)]
/// Focus over a vertical list of horizontal rows. Rows may be empty and are
/// skipped when moving vertically. The column is clamped to the target row.
pub struct FocusGrid {
    rows: Vec<Vec<FocusCell>>,
    point: Option<Point>,
}

impl FocusGrid {
    pub fn new(rows: Vec<Vec<FocusCell>>) -> Self {
        let point = rows
            .iter()
            .position(|r| !r.is_empty())
            .map(|row| Point { row, col: 0 });
        Self { rows, point }
    }

    pub fn focused(&self) -> Option<&FocusCell> {
        let p = self.point?;
        self.rows.get(p.row)?.get(p.col)
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focused().map(|c| c.id.as_str())
    }

    pub fn navigate(&mut self, directive: NavigationDirective) -> NavigationResult {
        let Some(point) = self.point else {
            return NavigationResult::NoNextItem;
        };

        match directive {
            NavigationDirective::Button(b) => match special_action(b) {
                Some(SpecialHandlerAction::JumpRowStart) => {
                    self.move_to(Point { col: 0, ..point }, false)
                }
                Some(SpecialHandlerAction::JumpRowEnd) => {
                    let last = self.rows[point.row].len() - 1;
                    self.move_to(Point { col: last, ..point }, false)
                }
                None => NavigationResult::NoNextItem,
            },
            NavigationDirective::Direction(d) => {
                let (x_dir, y_dir) = d.as_dir_vector();
                if y_dir == 0 {
                    let col = point.col as i64 + x_dir as i64;
                    if col < 0 || col as usize >= self.rows[point.row].len() {
                        return NavigationResult::NoNextItem;
                    }
                    return self.move_to(
                        Point {
                            col: col as usize,
                            ..point
                        },
                        false,
                    );
                }

                // Vertical: walk rows in the direction, skipping empty ones.
                let mut row = point.row as i64 + y_dir as i64;
                while row >= 0 && (row as usize) < self.rows.len() {
                    let target = &self.rows[row as usize];
                    if !target.is_empty() {
                        let col = point.col.min(target.len() - 1);
                        return self.move_to(
                            Point {
                                row: row as usize,
                                col,
                            },
                            true,
                        );
                    }
                    row += y_dir as i64;
                }
                NavigationResult::NoNextItem
            }
        }
    }

    fn move_to(&mut self, point: Point, across: bool) -> NavigationResult {
        self.point = Some(point);
        self.result_at(point, across)
    }

    fn result_at(&self, point: Point, across: bool) -> NavigationResult {
        match self.rows.get(point.row).and_then(|r| r.get(point.col)) {
            Some(cell) if across => NavigationResult::AcrossRows(cell.id.clone()),
            Some(cell) => NavigationResult::WithinRow(cell.id.clone()),
            None => NavigationResult::NoNextItem,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // HERO
    // trending: a b c
    // empty:
    // new:      d e
    fn simple_grid() -> FocusGrid {
        FocusGrid::new(vec![
            vec![FocusCell::hero("b")],
            vec![
                FocusCell::card("trending", "a"),
                FocusCell::card("trending", "b"),
                FocusCell::card("trending", "c"),
            ],
            vec![],
            vec![FocusCell::card("new", "d"), FocusCell::card("new", "e")],
        ])
    }

    fn dir(d: Direction) -> NavigationDirective {
        NavigationDirective::Direction(d)
    }

    #[test]
    fn starts_on_first_non_empty_row() {
        let grid = simple_grid();
        assert_eq!(grid.focused_id(), Some("HERO@b"));

        let grid = FocusGrid::new(vec![vec![], vec![FocusCell::card("r", "x")]]);
        assert_eq!(grid.focused_id(), Some("r@x"));
    }

    #[test]
    fn empty_grid_has_nothing_to_do() {
        let mut grid = FocusGrid::new(vec![vec![], vec![]]);
        assert_eq!(grid.navigate(dir(Direction::Down)), NavigationResult::NoNextItem);
        assert!(grid.focused().is_none());
    }

    #[test]
    fn navigation_right_then_edge() {
        let mut grid = simple_grid();
        grid.navigate(dir(Direction::Down));
        assert_eq!(
            grid.navigate(dir(Direction::Right)),
            NavigationResult::WithinRow("trending@b".to_owned())
        );
        grid.navigate(dir(Direction::Right));
        assert_eq!(grid.navigate(dir(Direction::Right)), NavigationResult::NoNextItem);
        assert_eq!(grid.focused_id(), Some("trending@c"));
    }

    #[test]
    fn down_skips_empty_rows_and_clamps_column() {
        let mut grid = simple_grid();
        grid.navigate(dir(Direction::Down));
        grid.navigate(dir(Direction::Right));
        grid.navigate(dir(Direction::Right));
        assert_eq!(
            grid.navigate(dir(Direction::Down)),
            NavigationResult::AcrossRows("new@e".to_owned())
        );
        assert_eq!(grid.navigate(dir(Direction::Down)), NavigationResult::NoNextItem);
    }

    #[test]
    fn up_returns_to_hero() {
        let mut grid = simple_grid();
        grid.navigate(dir(Direction::Down));
        grid.navigate(dir(Direction::Right));
        assert_eq!(
            grid.navigate(dir(Direction::Up)),
            NavigationResult::AcrossRows("HERO@b".to_owned())
        );
        assert_eq!(grid.focused().unwrap().movie_id, "b");
        assert_eq!(grid.navigate(dir(Direction::Up)), NavigationResult::NoNextItem);
    }

    #[test]
    fn shoulder_buttons_jump_within_row() {
        let mut grid = simple_grid();
        grid.navigate(dir(Direction::Down));
        assert_eq!(
            grid.navigate(NavigationDirective::Button(Button::RightTrigger)),
            NavigationResult::WithinRow("trending@c".to_owned())
        );
        assert_eq!(
            grid.navigate(NavigationDirective::Button(Button::LeftTrigger)),
            NavigationResult::WithinRow("trending@a".to_owned())
        );
        assert_eq!(
            grid.navigate(NavigationDirective::Button(Button::Select)),
            NavigationResult::NoNextItem
        );
    }

    #[test]
    fn dpad_maps_to_directions() {
        assert!(matches!(
            NavigationDirective::from_button(Button::DPadLeft),
            NavigationDirective::Direction(Direction::Left)
        ));
        assert!(matches!(
            NavigationDirective::from_button(Button::South),
            NavigationDirective::Button(Button::South)
        ));
    }
}
