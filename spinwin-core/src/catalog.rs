use crate::error::{Result, SpinError};
use crate::types::Prize;
use serde::{Deserialize, Serialize};

/// Ordered, non-empty list of prizes. Order is the slice order on the wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Prize>", into = "Vec<Prize>")]
pub struct Catalog {
    prizes: Vec<Prize>,
}

impl Catalog {
    pub fn new(prizes: Vec<Prize>) -> Result<Self> {
        if prizes.is_empty() {
            return Err(SpinError::config("Prize catalog cannot be empty"));
        }

        for prize in &prizes {
            if prize.label.trim().is_empty() {
                return Err(SpinError::config("Prize label cannot be empty"));
            }

            if let Some(weight) = prize.weight {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(SpinError::config(format!(
                        "Prize '{}' has invalid weight {}",
                        prize.label, weight
                    )));
                }
            }
        }

        let catalog = Self { prizes };
        if catalog.is_weighted() && catalog.total_weight() <= 0.0 {
            return Err(SpinError::config("Prize weights must not all be zero"));
        }

        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.prizes.len()
    }

    /// Never true for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Prize> {
        self.prizes.get(index)
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prize> {
        self.prizes.iter()
    }

    /// Weight used for selection; an unweighted prize counts as 1.0.
    pub fn effective_weight(&self, index: usize) -> f64 {
        self.prizes
            .get(index)
            .and_then(|p| p.weight)
            .unwrap_or(1.0)
    }

    pub fn total_weight(&self) -> f64 {
        (0..self.len()).map(|i| self.effective_weight(i)).sum()
    }

    pub fn is_weighted(&self) -> bool {
        self.prizes.iter().any(|p| p.weight.is_some())
    }

    /// True when every slice has the same chance, weighted or not.
    pub fn is_uniform(&self) -> bool {
        let first = self.effective_weight(0);
        (1..self.len()).all(|i| self.effective_weight(i) == first)
    }

    pub fn contains_spin_again(&self) -> bool {
        self.prizes.iter().any(Prize::is_spin_again)
    }
}

impl TryFrom<Vec<Prize>> for Catalog {
    type Error = SpinError;

    fn try_from(prizes: Vec<Prize>) -> Result<Self> {
        Catalog::new(prizes)
    }
}

impl From<Catalog> for Vec<Prize> {
    fn from(catalog: Catalog) -> Self {
        catalog.prizes
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            prizes: default_prizes(),
        }
    }
}

/// Customer service week giveaway lineup.
pub fn default_prizes() -> Vec<Prize> {
    vec![
        Prize::new("₦10,000 off your next order"),
        Prize::new("Free delivery coupon"),
        Prize::new("Surprise gift box"),
        Prize::new("₦5,000 shopping voucher"),
        Prize::new("Buy 1 get 1 free"),
        Prize::new("Discount up to 20%"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_rejected() {
        let result = Catalog::new(Vec::new());
        assert!(matches!(result, Err(SpinError::Config(_))));
    }

    #[test]
    fn test_invalid_weights_rejected() {
        assert!(Catalog::new(vec![Prize::weighted("a", -1.0)]).is_err());
        assert!(Catalog::new(vec![Prize::weighted("a", f64::NAN)]).is_err());
        assert!(Catalog::new(vec![Prize::weighted("a", 0.0), Prize::weighted("b", 0.0)]).is_err());
        assert!(Catalog::new(vec![Prize::new("  ")]).is_err());
    }

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 6);
        assert!(!catalog.is_weighted());
        assert!(catalog.is_uniform());
        assert_eq!(catalog.total_weight(), 6.0);
    }

    #[test]
    fn test_mixed_weights_default_to_one() {
        let catalog = Catalog::new(vec![Prize::weighted("a", 3.0), Prize::new("b")]).unwrap();
        assert!(catalog.is_weighted());
        assert!(!catalog.is_uniform());
        assert_eq!(catalog.effective_weight(1), 1.0);
        assert_eq!(catalog.total_weight(), 4.0);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Catalog =
            serde_json::from_str(r#"[{"label":"a"},{"label":"b","weight":2.0,"kind":"spin_again"}]"#)
                .unwrap();
        assert_eq!(ok.len(), 2);
        assert!(ok.contains_spin_again());

        let empty: std::result::Result<Catalog, _> = serde_json::from_str("[]");
        assert!(empty.is_err());
    }
}
