//! Garment sizes.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category keywords whose products must be added to the cart with a size.
const SIZED_CATEGORIES: &[&str] = &["hoodie", "tshirt", "sweatshirt", "jacket"];

/// Error returned when a size label is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown size: {0}")]
pub struct SizeError(pub String);

/// A garment size offered on the product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
}

impl Size {
    /// All sizes in display order.
    pub const ALL: [Self; 6] = [Self::XS, Self::S, Self::M, Self::L, Self::XL, Self::XXL];

    /// Label as shown to shoppers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::XS => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::XL => "XL",
            Self::XXL => "XXL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == upper)
            .ok_or_else(|| SizeError(s.to_string()))
    }
}

/// Whether products in `category` are sold by size.
#[must_use]
pub fn requires_size(category: &str) -> bool {
    let category = category.to_lowercase();
    SIZED_CATEGORIES
        .iter()
        .any(|keyword| category.contains(keyword))
}
