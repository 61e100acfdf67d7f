//! OVD Match Common Library
//!
//! 構造化住所と抽出住所テキストの照合エンジン（I/Oを持たない純粋な計算部分）

pub mod types;
pub mod error;
pub mod stopwords;
pub mod normalize;
pub mod similarity;
pub mod field_matcher;
pub mod pincode;
pub mod decision;
pub mod engine;

pub use types::{AddressField, FieldScoreMap, MatchResult, StructuredRecord};
pub use error::{Error, Result};
pub use stopwords::{StopwordSet, INDIAN_STOPWORDS};
pub use normalize::{normalize, tokenize};
pub use similarity::similarity;
pub use field_matcher::score_fields;
pub use pincode::{extract_pincode, pincode_match};
pub use decision::{decide, Decision, MatchPolicy};
pub use engine::{AddressMatcher, MatchTrace};
