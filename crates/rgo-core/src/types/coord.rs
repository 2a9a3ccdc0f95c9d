//! 盤上の交点（Coord）

/// デフォルトの盤サイズ（19路）
pub const DEFAULT_BOARD_SIZE: u8 = 19;

/// 対応する最大盤サイズ。列・行の文字は `a..=y` に収まる。
pub const MAX_BOARD_SIZE: u8 = 25;

/// 0始まりの交点（列 `x`、行 `y`）
///
/// パスは `Coord` ではなく `Option<Coord>::None` で表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    x: u8,
    y: u8,
}

impl Coord {
    #[inline]
    pub const fn new(x: u8, y: u8) -> Coord {
        Coord { x, y }
    }

    /// 列（0 = 左端）
    #[inline]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// 行（0 = 上端）
    #[inline]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// `size` 路盤の内側にあるか
    #[inline]
    pub const fn is_on_board(self, size: u8) -> bool {
        self.x < size && self.y < size
    }

    /// `size` 路盤での格納インデックス（x優先）
    #[inline]
    pub const fn index(self, size: u8) -> usize {
        self.x as usize * size as usize + self.y as usize
    }

    /// [`Coord::index`] の逆変換
    #[inline]
    pub const fn from_index(index: usize, size: u8) -> Coord {
        let size = size as usize;
        Coord {
            x: (index / size) as u8,
            y: (index % size) as u8,
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
