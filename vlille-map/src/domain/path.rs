//! Cycle-path geometry.

use serde::{Deserialize, Serialize};

use super::Point;

/// A cycle path made of one or more polylines.
///
/// Every line holds at least two points; `CyclePath::new` drops shorter
/// lines and returns `None` when nothing drawable is left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclePath {
    pub id: Option<String>,
    pub name: Option<String>,
    pub lines: Vec<Vec<Point>>,
}

impl CyclePath {
    pub fn new(id: Option<String>, name: Option<String>, lines: Vec<Vec<Point>>) -> Option<Self> {
        let lines: Vec<Vec<Point>> = lines.into_iter().filter(|l| l.len() >= 2).collect();
        if lines.is_empty() {
            return None;
        }
        Some(Self { id, name, lines })
    }
}
