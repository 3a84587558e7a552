use std::fmt::{Display, Formatter};

use crate::error::{Result, StoreError};

/// Maximum product name length, in characters.
pub const MAX_NAME_LEN: usize = 49;

/// A catalog entry.
///
/// The id is fixed at construction; name, price and stock can be changed
/// in place through the setters.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    id: i64,
    name: String,
    price: f64,
    stock: u32,
}

impl ProductRecord {
    /// Create a validated record.
    pub fn new(id: i64, name: impl Into<String>, price: f64, stock: u32) -> Result<Self> {
        let name = name.into();
        check_name(&name)?;
        check_price(price)?;
        Ok(Self { id, name, price, stock })
    }

    pub fn id(&self) -> i64 {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn price(&self) -> f64 {
        self.price
    }
    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        check_name(&name)?;
        self.name = name;
        Ok(())
    }
    pub fn set_price(&mut self, price: f64) -> Result<()> {
        check_price(price)?;
        self.price = price;
        Ok(())
    }
    pub fn set_stock(&mut self, stock: u32) {
        self.stock = stock;
    }
}

impl Display for ProductRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {} | {:.2} | stock {}", self.id, self.name, self.price, self.stock)
    }
}

fn check_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(StoreError::NameTooLong { len, max: MAX_NAME_LEN });
    }
    Ok(())
}

fn check_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(StoreError::InvalidPrice { price });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let p = ProductRecord::new(1, "Camiseta Básica", 39.90, 100).unwrap();
        assert_eq!(p.id(), 1);
        assert_eq!(p.name(), "Camiseta Básica");
        assert_eq!(p.price(), 39.90);
        assert_eq!(p.stock(), 100);
    }

    #[test]
    fn test_name_limit_counts_chars() {
        // 49 multi-byte characters are fine, 50 are not.
        let ok: String = "é".repeat(MAX_NAME_LEN);
        assert!(ProductRecord::new(1, ok, 1.0, 1).is_ok());

        let long: String = "é".repeat(MAX_NAME_LEN + 1);
        assert_eq!(
            ProductRecord::new(1, long, 1.0, 1),
            Err(StoreError::NameTooLong { len: 50, max: 49 })
        );
    }

    #[test]
    fn test_invalid_price() {
        assert!(matches!(
            ProductRecord::new(1, "x", -0.5, 1),
            Err(StoreError::InvalidPrice { .. })
        ));
        assert!(ProductRecord::new(1, "x", f64::NAN, 1).is_err());
        assert!(ProductRecord::new(1, "x", f64::INFINITY, 1).is_err());
        assert!(ProductRecord::new(1, "x", 0.0, 0).is_ok());
    }

    #[test]
    fn test_setters() {
        let mut p = ProductRecord::new(7, "Gravata", 59.90, 10).unwrap();
        p.set_stock(3);
        p.set_price(10.0).unwrap();
        p.set_name("Gravata Slim").unwrap();
        assert_eq!(p.stock(), 3);
        assert_eq!(p.price(), 10.0);
        assert_eq!(p.name(), "Gravata Slim");

        assert!(p.set_price(-1.0).is_err());
        assert_eq!(p.price(), 10.0);
    }

    #[test]
    fn test_display() {
        let p = ProductRecord::new(3, "Tênis Casual", 179.9, 5).unwrap();
        assert_eq!(p.to_string(), "3 | Tênis Casual | 179.90 | stock 5");
    }
}
