use mines_core::{Cell, CellState, Minefield};

/// What a single cell looks like to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tile {
    Closed,
    Flag,
    Number(u8),
    /// The mine that was opened.
    Bomb,
    /// A mine left closed when the game was lost.
    Mine,
    /// A flag placed on a safe cell, shown once the game is lost.
    Miss,
}

impl Tile {
    pub fn for_cell(cell: Cell, exploded: bool) -> Self {
        use CellState::*;

        match (cell.state(), exploded) {
            (Exploded, _) => Self::Bomb,
            (Opened, _) => Self::Number(cell.mines_around()),
            (Flagged, true) if !cell.is_mined() => Self::Miss,
            (Flagged, _) => Self::Flag,
            (Hidden, true) if cell.is_mined() => Self::Mine,
            (Hidden, _) => Self::Closed,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Closed => '#',
            Self::Flag => 'F',
            Self::Number(0) => '.',
            Self::Number(n) => char::from(b'0' + n.min(9)),
            Self::Bomb => '*',
            Self::Mine => '@',
            Self::Miss => 'x',
        }
    }
}

/// Draws the board with column numbers on top and row numbers on the left.
pub fn render(field: &Minefield) -> String {
    let (width, height) = field.size();
    let exploded = field.exploded();

    let header: String = (0..width).map(|x| format!("{x:>3}")).collect();
    let mut out = format!("    {header}\n");

    for y in 0..height {
        let row: String = (0..width)
            .map(|x| {
                let tile = field
                    .at((x, y))
                    .map(|cell| Tile::for_cell(cell, exploded))
                    .unwrap_or(Tile::Closed);
                format!("{:>3}", tile.glyph())
            })
            .collect();
        out.push_str(&format!("{y:>3} {row}\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mines_core::MineLayout;

    fn field(size: (u8, u8), mines: &[(u8, u8)]) -> Minefield {
        Minefield::new(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    fn rows(field: &Minefield) -> Vec<String> {
        render(field)
            .lines()
            .skip(1)
            .map(|line| line.split_whitespace().skip(1).collect())
            .collect()
    }

    #[test]
    fn playing_board_shows_counts_flags_and_closed() {
        let mut field = field((3, 3), &[(2, 2)]);
        field.open((1, 1)).unwrap();
        field.flag((2, 2)).unwrap();

        assert_eq!(rows(&field), ["###", "#1#", "##F"]);
    }

    #[test]
    fn lost_board_reveals_mines_and_wrong_flags() {
        let mut field = field((3, 2), &[(0, 0), (2, 0), (2, 1)]);
        field.flag((2, 0)).unwrap();
        field.flag((1, 1)).unwrap();
        field.open((0, 1)).unwrap();
        field.open((0, 0)).unwrap();

        assert_eq!(rows(&field), ["*#F", "1x@"]);
    }

    #[test]
    fn won_board_shows_zero_cells_as_dots() {
        let mut field = field((3, 3), &[(2, 2)]);
        field.open((0, 0)).unwrap();

        assert_eq!(rows(&field), ["...", ".11", ".1#"]);
    }

    #[test]
    fn rows_are_labelled_and_aligned() {
        let text = render(&field((2, 2), &[]));

        assert_eq!(text, "      0  1\n  0   #  #\n  1   #  #\n");
    }

    #[test]
    fn header_numbers_columns() {
        let field = field((3, 1), &[]);
        let text = render(&field);
        let header: Vec<_> = text.lines().next().unwrap().split_whitespace().collect();

        assert_eq!(header, ["0", "1", "2"]);
    }
}
