use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;

/// Notice boards published on kujap.com.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Undergraduate = 1,
    Graduate = 2,
    Job = 3,
}

const SCHOLARSHIP_MARKER: &str = "장학";

impl Category {
    pub const ALL: [Category; 3] = [Category::Undergraduate, Category::Graduate, Category::Job];

    /// The `bbs_cls_cd` value the site uses to select this board.
    pub fn board_id(self) -> &'static str {
        match self {
            Category::Undergraduate => "005003001",
            Category::Graduate => "005003002",
            Category::Job => "005008",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Undergraduate => "학부",
            Category::Graduate => "대학원",
            Category::Job => "취업정보",
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for Category {
    type Error = ScrapeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Category::Undergraduate),
            2 => Ok(Category::Graduate),
            3 => Ok(Category::Job),
            other => Err(ScrapeError::InvalidCategory(other)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Builds the display category for a notice.
///
/// Job postings carry the bare board label. The academic boards are split
/// into scholarship notices ("장학") and everything else ("공지") by title.
pub fn classify(title: &str, category: Category) -> String {
    match category {
        Category::Job => category.label().to_string(),
        _ if title.contains(SCHOLARSHIP_MARKER) => format!("{} 장학", category.label()),
        _ => format!("{} 공지", category.label()),
    }
}
