//! スプレッドシート入出力
//!
//! 1枚目のワークシートを「ヘッダー行 + データ行」の表として扱う。

pub mod reader;
pub mod writer;

use std::collections::BTreeSet;

pub use reader::read_table;
pub use writer::write_table;

/// セル値
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// 照合用の文字列表現
    ///
    /// 整数値の数値は小数点なしで出力する（PINコードが "400001.0" にならないように）。
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
        }
    }

    /// 数値として解釈（文字列の数値も受け付ける）
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse().ok(),
            Cell::Bool(_) | Cell::Empty => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// ヘッダー付きの表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// スコア書式（小数2桁）で書き出す列
    score_columns: BTreeSet<usize>,
}

impl Table {
    pub fn new(sheet_name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            headers,
            rows: Vec::new(),
            score_columns: BTreeSet::new(),
        }
    }

    /// 列番号を取得（完全一致を優先し、次に前後空白・大文字小文字を無視）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .or_else(|| {
                let wanted = name.trim().to_lowercase();
                self.headers.iter().position(|h| h.trim().to_lowercase() == wanted)
            })
    }

    /// 行の列値（範囲外は空セル）
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }

    /// 列を上書き、無ければ末尾に追加（列番号を返す）
    pub fn set_column(&mut self, name: &str, values: Vec<Cell>) -> usize {
        let index = match self.column_index(name) {
            Some(index) => index,
            None => {
                self.headers.push(name.to_string());
                self.headers.len() - 1
            }
        };

        for (row, value) in self.rows.iter_mut().zip(values) {
            if row.len() <= index {
                row.resize(index + 1, Cell::Empty);
            }
            row[index] = value;
        }
        index
    }

    /// スコア列として上書き・追加する
    pub fn set_score_column(&mut self, name: &str, values: Vec<Cell>) {
        let index = self.set_column(name, values);
        self.score_columns.insert(index);
    }

    pub fn is_score_column(&self, column: usize) -> bool {
        self.score_columns.contains(&column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
