use std::collections::BTreeMap;
use std::fmt::Display;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// Number of decimal digits of the shop currency
pub const PRICE_DIGITS: usize = 2;

/// Minor units in a whole currency unit
const SCALE: u64 = 100;

/// A non-negative price, kept in minor units of the shop currency.
///
/// The catalog source writes prices either as JSON numbers or as numeric strings, both are
/// normalized here so that nothing downstream ever sees the union. Either form is rejected
/// when it does not fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Largest price expressible in whole units
    pub const MAX_UNITS: u64 = u64::MAX / SCALE;

    /// A price of `minor` hundredths of the currency unit
    pub fn from_minor_units(minor: u64) -> Self {
        Price(minor)
    }

    /// A price of `units` whole currency units, saturating above [`Price::MAX_UNITS`]
    pub fn from_units(units: u64) -> Self {
        Price(units.saturating_mul(SCALE))
    }

    /// A price of `units` whole currency units
    pub fn try_from_units(units: u64) -> Result<Self, Error> {
        units
            .checked_mul(SCALE)
            .map(Price)
            .ok_or_else(|| Error::PriceOverflow(units.to_string()))
    }

    /// Convert a JSON-like floating point value, rounding to the nearest minor unit
    pub fn from_f64(value: f64) -> Result<Self, Error> {
        let minor = (value * SCALE as f64).round();
        if !value.is_finite() || value < 0.0 || minor >= u64::MAX as f64 {
            return Err(Error::PriceOutOfRange(value));
        }
        Ok(Price(minor as u64))
    }

    pub fn minor_units(&self) -> u64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    fn whole_units(&self) -> Option<u64> {
        (self.0 % SCALE == 0).then_some(self.0 / SCALE)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Price {
        iter.copied().sum()
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.whole_units() {
            Some(units) => write!(f, "{units}"),
            None => write!(f, "{}.{:02}", self.0 / SCALE, self.0 % SCALE),
        }
    }
}

impl FromStr for Price {
    type Err = Error;

    /// Parse a plain decimal number such as `12`, `12.5` or `.99`, surrounding whitespace allowed
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let given = s.trim();
        let (whole, fraction) = given.split_once('.').unwrap_or((given, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(Error::InvalidPrice(s.to_string()));
        }
        if fraction.len() > PRICE_DIGITS {
            return Err(Error::PriceTooPrecise(s.to_string()));
        }

        let overflow = || Error::PriceOverflow(given.to_string());
        // only digits are left, a parse failure is an overflow
        let whole: u64 = match whole {
            "" => 0,
            whole => whole.parse().map_err(|_| overflow())?,
        };
        let fraction: u64 = format!("{fraction:0<PRICE_DIGITS$}")
            .parse()
            .map_err(|_| overflow())?;

        whole
            .checked_mul(SCALE)
            .and_then(|minor| minor.checked_add(fraction))
            .map(Price)
            .ok_or_else(overflow)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.whole_units() {
            Some(units) => serializer.serialize_u64(units),
            None => serializer.serialize_f64(self.as_f64()),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawPrice {
            Integer(u64),
            Float(f64),
            Text(String),
        }

        let price = match RawPrice::deserialize(deserializer)? {
            RawPrice::Integer(units) => Price::try_from_units(units),
            RawPrice::Float(value) => Price::from_f64(value),
            RawPrice::Text(text) => text.parse(),
        };
        price.map_err(serde::de::Error::custom)
    }
}

/// Identifier of a product, stable for the lifetime of the catalog entry.
///
/// Numeric strings are normalized to [`ProductId::Number`] so that the id parsed from a route
/// like `/product/3` matches a catalog entry declared either as `3` or `"3"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(u64),
    Text(String),
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{n}"),
            ProductId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for ProductId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::EmptyProductId);
        }
        Ok(match s.parse::<u64>() {
            Ok(n) => ProductId::Number(n),
            Err(_) => ProductId::Text(s.to_string()),
        })
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        ProductId::Number(value)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(ProductId::Number(n)),
            RawId::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// The fixed set of product categories, identified by their lowercase id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electric,
    Hardware,
    Stationery,
    Apparel,
    Stickers,
    Software,
}

impl Category {
    /// Every category, in the order they are offered in the shop filter
    pub const ALL: [Category; 6] = [
        Category::Electric,
        Category::Hardware,
        Category::Stationery,
        Category::Apparel,
        Category::Stickers,
        Category::Software,
    ];

    /// The identifier used in the catalog and in filters
    pub fn id(&self) -> &'static str {
        match self {
            Category::Electric => "electric",
            Category::Hardware => "hardware",
            Category::Stationery => "stationery",
            Category::Apparel => "apparel",
            Category::Stickers => "stickers",
            Category::Software => "software",
        }
    }

    /// Human readable name
    pub fn label(&self) -> &'static str {
        match self {
            Category::Electric => "Electronics",
            Category::Hardware => "Hardware & Tools",
            Category::Stationery => "Stationery",
            Category::Apparel => "Apparel",
            Category::Stickers => "Stickers",
            Category::Software => "Software & Subscriptions",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Exact, case-sensitive match against the identifier (not the label)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// A product of the catalog.
///
/// The same shape is used for the snapshots stored in the cart and the wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub price: Price,

    #[serde(default)]
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<BTreeMap<String, String>>,

    /// Cost in the alternate currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coins: Option<u64>,

    #[serde(
        default,
        alias = "orignalLink",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_link: Option<String>,
}

impl Product {
    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    /// A product without the flag is shown as out of stock
    pub fn is_in_stock(&self) -> bool {
        self.in_stock.unwrap_or(false)
    }
}
