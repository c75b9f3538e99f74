//! Notice data structure.

use serde::{Deserialize, Serialize};

/// A notice scraped from the board list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    /// Board sequence number as decimal text
    pub id: String,

    /// Notice title
    pub title: String,

    /// Full URL to the notice detail page
    pub link: String,

    /// Display metadata shown next to the title
    pub info: NoticeInfo,
}

/// Free-form display fields of a notice row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeInfo {
    /// Category label
    #[serde(rename = "typeCL", default)]
    pub type_cl: String,

    /// Publish date text
    #[serde(default)]
    pub date: String,

    /// Validity period text
    #[serde(rename = "dateLast", default)]
    pub date_last: String,
}

impl Notice {
    /// Numeric value of the board sequence number.
    ///
    /// Returns `None` when the id is not a plain decimal number.
    pub fn numeric_id(&self) -> Option<u64> {
        parse_id(&self.id)
    }
}

/// Parse a board sequence number.
pub fn parse_id(id: &str) -> Option<u64> {
    id.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_notice() -> Notice {
        Notice {
            id: "1024".to_string(),
            title: "2026학년도 1학기 수강신청 안내".to_string(),
            link: "https://mirae.yonsei.ac.kr/bbs/wj/1415/1024/artclView.do?layout=unknown"
                .to_string(),
            info: NoticeInfo {
                type_cl: "학사".to_string(),
                date: "2026.02.01".to_string(),
                date_last: String::new(),
            },
        }
    }

    #[test]
    fn test_numeric_id() {
        assert_eq!(sample_notice().numeric_id(), Some(1024));
        assert_eq!(parse_id(" 77 "), Some(77));
        assert_eq!(parse_id("공지"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("184467440737095516160"), None);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(sample_notice()).unwrap();
        assert_eq!(value["id"], "1024");
        assert_eq!(value["info"]["typeCL"], "학사");
        assert_eq!(value["info"]["dateLast"], "");
    }
}
