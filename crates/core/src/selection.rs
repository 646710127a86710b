//! City / branch / category selection.
//!
//! Three independent axes, each defaulting to [`Choice::All`]. Every
//! transition returns the list of views the caller has to refresh; the
//! selection itself never performs I/O.

use serde::{Deserialize, Serialize};

use crate::types::catalog::{ProductFilter, active};

/// Value of a single selection axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    /// Interpret user input: blank or `all` means no constraint.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        active(Some(input.trim())).map_or(Self::All, |v| Self::Only(v.to_owned()))
    }

    /// The concrete value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(v) => Some(v),
        }
    }

    /// Whether this axis imposes no constraint.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// A view that must be reloaded after a selection change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// Reload the branch list, scoped to the given city.
    Branches(Choice),
    /// Re-query products with the current filter.
    Products,
}

/// The shopper's current filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopSelection {
    pub city: Choice,
    pub branch: Choice,
    pub category: Choice,
}

impl ShopSelection {
    /// Start with no filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a city. The branch choice is kept as-is.
    pub fn select_city(&mut self, city: &str) -> Vec<Refresh> {
        self.city = Choice::from_input(city);
        vec![Refresh::Branches(self.city.clone()), Refresh::Products]
    }

    /// Select a branch by id (as entered).
    pub fn select_branch(&mut self, branch: &str) -> Vec<Refresh> {
        self.branch = Choice::from_input(branch);
        vec![Refresh::Products]
    }

    /// Select a category.
    pub fn select_category(&mut self, category: &str) -> Vec<Refresh> {
        self.category = Choice::from_input(category);
        vec![Refresh::Products]
    }

    /// Clear every axis and reload the unfiltered catalog.
    pub fn reset(&mut self) -> Vec<Refresh> {
        *self = Self::default();
        vec![Refresh::Branches(Choice::All), Refresh::Products]
    }

    /// Whether no axis is constrained.
    #[must_use]
    pub const fn is_unfiltered(&self) -> bool {
        self.city.is_all() && self.branch.is_all() && self.category.is_all()
    }

    /// The product filter for the current selection. `All` axes are omitted.
    #[must_use]
    pub fn to_filter(&self) -> ProductFilter {
        ProductFilter {
            city: self.city.value().map(str::to_owned),
            branch: self.branch.value().map(str::to_owned),
            category: self.category.value().map(str::to_owned),
        }
    }
}
