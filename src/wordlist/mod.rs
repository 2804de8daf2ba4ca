// ワードリスト入力 - 行の読み込みとフォルダ内のワードリスト発見

pub mod reader;
pub mod scanner;

pub use reader::{count_words, strip_line_terminator, WordlistReader};
pub use scanner::WordlistScanner;
