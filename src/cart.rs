//! Shopping-cart ledger.
//!
//! A [`CartLedger`] records how many units of each product are reserved.
//! Reserving withdraws the units from the product's stock in the catalog,
//! releasing puts them back. The ledger does not own the catalog: every
//! operation borrows the [`CatalogStore`] it works against.
//!
//! Reservations are kept in insertion order, one per product id. Reserving a
//! product that is already in the cart increases the existing reservation.

use log::{debug, warn};

use crate::error::CartError;
use crate::store::CatalogStore;
use crate::table::Table;

/// Units of one product held by the cart.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CartReservation {
    pub product_id: i64,
    pub quantity: u32,
}

/// One priced cart line, resolved against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
}

#[derive(Debug, Default, Clone)]
pub struct CartLedger {
    reservations: Vec<CartReservation>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reservations(&self) -> &[CartReservation] {
        &self.reservations
    }
    pub fn len(&self) -> usize {
        self.reservations.len()
    }
    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Units of `product_id` currently reserved (0 if none).
    pub fn quantity_of(&self, product_id: i64) -> u32 {
        self.position(product_id)
            .map(|i| self.reservations[i].quantity)
            .unwrap_or(0)
    }

    fn position(&self, product_id: i64) -> Option<usize> {
        self.reservations.iter().position(|r| r.product_id == product_id)
    }

    /// Reserve `quantity` units of `product_id`.
    ///
    /// Either the whole quantity is reserved or nothing changes.
    pub fn reserve<T: Table>(
        &mut self,
        store: &mut CatalogStore<T>,
        product_id: i64,
        quantity: u32,
    ) -> Result<(), CartError> {
        debug!("reserve(id = {}, quantity = {})", product_id, quantity);

        if quantity == 0 {
            return Err(CartError::ZeroQuantity { id: product_id });
        }

        let product = store
            .search_mut(product_id)
            .ok_or(CartError::ProductNotFound { id: product_id })?;
        if product.stock() < quantity {
            return Err(CartError::InsufficientStock {
                id: product_id,
                requested: quantity,
                available: product.stock(),
            });
        }

        let i = self.position(product_id);
        let reserved = i.map_or(0, |i| self.reservations[i].quantity);
        let Some(merged) = reserved.checked_add(quantity) else {
            return Err(CartError::ReservationOverflow {
                id: product_id,
                reserved,
                requested: quantity,
            });
        };

        product.set_stock(product.stock() - quantity);
        match i {
            Some(i) => self.reservations[i].quantity = merged,
            None => self.reservations.push(CartReservation { product_id, quantity }),
        }
        Ok(())
    }

    /// Release up to `quantity` units of `product_id` back to stock.
    ///
    /// Releasing at least the reserved amount drops the reservation and
    /// restores exactly what was reserved.
    pub fn release<T: Table>(
        &mut self,
        store: &mut CatalogStore<T>,
        product_id: i64,
        quantity: u32,
    ) -> Result<(), CartError> {
        debug!("release(id = {}, quantity = {})", product_id, quantity);

        let i = self
            .position(product_id)
            .ok_or(CartError::NotInCart { id: product_id })?;

        let reserved = self.reservations[i].quantity;
        let restored = if quantity >= reserved {
            self.reservations.remove(i);
            reserved
        } else {
            self.reservations[i].quantity -= quantity;
            quantity
        };

        match store.search_mut(product_id) {
            Some(product) => product.set_stock(product.stock().saturating_add(restored)),
            None => warn!(
                "release(id = {}): product left the catalog, {} units not restored",
                product_id, restored
            ),
        }
        Ok(())
    }

    /// Release every reservation back to stock.
    pub fn clear<T: Table>(&mut self, store: &mut CatalogStore<T>) {
        for reservation in std::mem::take(&mut self.reservations) {
            if let Some(product) = store.search_mut(reservation.product_id) {
                product.set_stock(product.stock().saturating_add(reservation.quantity));
            }
        }
    }

    /// Priced lines for every reservation whose product is still in the catalog.
    pub fn lines<T: Table>(&self, store: &CatalogStore<T>) -> Vec<CartLine> {
        self.reservations
            .iter()
            .filter_map(|r| {
                let product = store.search(r.product_id)?;
                Some(CartLine {
                    product_id: r.product_id,
                    name: product.name().to_string(),
                    quantity: r.quantity,
                    unit_price: product.price(),
                    subtotal: product.price() * r.quantity as f64,
                })
            })
            .collect()
    }

    /// Cart total at the products' current prices.
    pub fn total<T: Table>(&self, store: &CatalogStore<T>) -> f64 {
        self.reservations
            .iter()
            .filter_map(|r| store.search(r.product_id).map(|p| p.price() * r.quantity as f64))
            .sum()
    }
}
