use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use ahash::AHashSet;
use memmap2::Mmap;
use tracing::debug;

use crate::error::DedupError;

pub const HASH_IN: &str = "hash.txt";
pub const MOVE_IN: &str = "moves.txt";
pub const SCORE_IN: &str = "scores.txt";

pub const HASH_OUT: &str = "new_hash.txt";
pub const MOVE_OUT: &str = "new_moves.txt";
pub const SCORE_OUT: &str = "new_scores.txt";

/// 输出条目之间的分隔符，最后一条后面也保留
pub const SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub rows: usize,
    pub unique: usize,
}

pub struct Deduplicator {
    dir: PathBuf,
}

impl Deduplicator {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn run(&self) -> Result<Summary, DedupError> {
        // 1. 一次性读入三个输入文件
        let hashes = read_lines(&self.dir.join(HASH_IN))?;
        let moves = read_lines(&self.dir.join(MOVE_IN))?;
        let scores = read_lines(&self.dir.join(SCORE_IN))?;

        // 三个文件必须等长（原脚本静默截断 / 补空串，这里直接报错）
        if hashes.len() != moves.len() || hashes.len() != scores.len() {
            return Err(DedupError::LengthMismatch {
                hashes: hashes.len(),
                moves: moves.len(),
                scores: scores.len(),
            });
        }

        // 2. 单趟去重，保持首次出现顺序
        let out = join_unique(&hashes, &moves, &scores);
        debug!(rows = hashes.len(), unique = out.unique, "dedup pass done");

        // 3. 输出只在最后写一次；空输入也会建出空文件
        write_output(&self.dir.join(HASH_OUT), &out.hashes)?;
        write_output(&self.dir.join(MOVE_OUT), &out.moves)?;
        write_output(&self.dir.join(SCORE_OUT), &out.scores)?;

        Ok(Summary {
            rows: hashes.len(),
            unique: out.unique,
        })
    }
}

struct Outputs {
    hashes: String,
    moves: String,
    scores: String,
    unique: usize,
}

/// 按 hash 首次出现保留整行，三个缓冲始终同步追加
fn join_unique(hashes: &[String], moves: &[String], scores: &[String]) -> Outputs {
    debug_assert_eq!(hashes.len(), moves.len());
    debug_assert_eq!(hashes.len(), scores.len());

    let mut seen: AHashSet<&str> = AHashSet::with_capacity(hashes.len());
    let mut out = Outputs {
        hashes: String::new(),
        moves: String::new(),
        scores: String::new(),
        unique: 0,
    };

    for i in 0..hashes.len() {
        if seen.insert(hashes[i].as_str()) {
            out.hashes.push_str(&hashes[i]);
            out.hashes.push_str(SEPARATOR);
            out.moves.push_str(&moves[i]);
            out.moves.push_str(SEPARATOR);
            out.scores.push_str(&scores[i]);
            out.scores.push_str(SEPARATOR);
        }
    }

    out.unique = seen.len();
    out
}

fn read_lines(path: &Path) -> Result<Vec<String>, DedupError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            DedupError::MissingInput {
                path: path.to_path_buf(),
                source: e,
            }
        } else {
            DedupError::Io(e)
        }
    })?;

    // 空文件不能 mmap
    if file.metadata()?.len() == 0 {
        return Ok(Vec::new());
    }

    let mmap = unsafe { Mmap::map(&file)? };
    let content = std::str::from_utf8(&mmap).map_err(|e| DedupError::Utf8 {
        path: path.to_path_buf(),
        source: e,
    })?;

    // lines() 顺便把 \n / \r\n 统一剥掉，成员判断和输出都用剥过的值
    Ok(content.lines().map(str::to_owned).collect())
}

fn write_output(path: &Path, content: &str) -> Result<(), DedupError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(vals: &[&str]) -> Vec<String> {
        vals.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_first_occurrence_of_each_hash() {
        let out = join_unique(
            &rows(&["A", "B", "A"]),
            &rows(&["m1", "m2", "m3"]),
            &rows(&["1", "2", "3"]),
        );
        assert_eq!(out.hashes, "A, B, ");
        assert_eq!(out.moves, "m1, m2, ");
        assert_eq!(out.scores, "1, 2, ");
        assert_eq!(out.unique, 2);
    }

    #[test]
    fn identical_hashes_collapse_to_first_row() {
        let hashes = rows(&["X", "X", "X", "X", "X"]);
        let moves = rows(&["a", "b", "c", "d", "e"]);
        let scores = rows(&["1", "2", "3", "4", "5"]);
        let out = join_unique(&hashes, &moves, &scores);
        assert_eq!(out.hashes, "X, ");
        assert_eq!(out.moves, "a, ");
        assert_eq!(out.scores, "1, ");
        assert_eq!(out.unique, 1);
    }

    #[test]
    fn empty_input_yields_empty_buffers() {
        let out = join_unique(&[], &[], &[]);
        assert_eq!(out.hashes, "");
        assert_eq!(out.moves, "");
        assert_eq!(out.scores, "");
        assert_eq!(out.unique, 0);
    }

    #[test]
    fn output_order_matches_first_seen_order() {
        let out = join_unique(
            &rows(&["c", "a", "b", "a", "c", "d"]),
            &rows(&["m1", "m2", "m3", "m4", "m5", "m6"]),
            &rows(&["1", "2", "3", "4", "5", "6"]),
        );
        assert_eq!(out.hashes, "c, a, b, d, ");
        assert_eq!(out.moves, "m1, m2, m3, m6, ");
        assert_eq!(out.scores, "1, 2, 3, 6, ");
    }

    #[test]
    fn empty_lines_are_values_too() {
        // 空行也是合法的 hash 值，只保留第一个
        let out = join_unique(
            &rows(&["", "A", ""]),
            &rows(&["m1", "m2", "m3"]),
            &rows(&["1", "2", "3"]),
        );
        assert_eq!(out.hashes, ", A, ");
        assert_eq!(out.moves, "m1, m2, ");
        assert_eq!(out.scores, "1, 2, ");
    }
}
