use serde::{Deserialize, Deserializer, Serialize};

use crate::container::Bin;
use crate::error::{Error, Result};
use crate::heuristic::{SortDirection, Strategy};
use crate::item::Item;
use crate::packager::Packager;
use crate::report::{PackingReport, Precision};

/// Accepts `"1"` or `1` for an id.
pub fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

/// Accepts `1`/`-1` or `"asc"`/`"desc"` (and the long forms).
pub fn deserialize_direction<'de, D>(deserializer: D) -> std::result::Result<SortDirection, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDirection {
        Text(String),
        Int(i64),
    }

    let direction: Result<SortDirection> = match RawDirection::deserialize(deserializer)? {
        RawDirection::Text(s) => s.parse(),
        RawDirection::Int(n) => SortDirection::try_from(n),
    };
    direction.map_err(serde::de::Error::custom)
}

/// Raw cuboid definition shared by bins and items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuboidSpec {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub length: f64,
    pub height: f64,
    pub breadth: f64,
    pub weight: f64,
}

impl CuboidSpec {
    pub fn new(id: impl Into<String>, length: f64, height: f64, breadth: f64, weight: f64) -> Self {
        Self {
            id: id.into(),
            length,
            height,
            breadth,
            weight,
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("length", self.length),
            ("height", self.height),
            ("breadth", self.breadth),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(Error::InvalidDimension {
                    id: self.id.clone(),
                    reason: format!("{name} must be positive, got {v}"),
                });
            }
        }
        if !(self.weight.is_finite() && self.weight >= 0.0) {
            return Err(Error::InvalidWeight {
                id: self.id.clone(),
                weight: self.weight,
            });
        }
        Ok(())
    }

    pub fn to_bin(&self) -> Result<Bin> {
        self.validate()?;
        Ok(Bin::new(
            self.id.clone(),
            self.length,
            self.height,
            self.breadth,
            self.weight,
        ))
    }

    pub fn to_item(&self) -> Result<Item> {
        self.validate()?;
        Ok(Item::new(
            self.id.clone(),
            self.length,
            self.height,
            self.breadth,
            self.weight,
        ))
    }
}

fn default_strategy() -> String {
    Strategy::FirstFit.to_string()
}

/// A complete packing request as read from JSON or assembled from CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackJob {
    pub bins: Vec<CuboidSpec>,
    pub items: Vec<CuboidSpec>,
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default, deserialize_with = "deserialize_direction")]
    pub sort: SortDirection,
    #[serde(default)]
    pub precision: Option<i64>,
}

impl PackJob {
    /// Validates every input, then packs to completion. Nothing is packed if
    /// any bin, item or option is rejected.
    pub fn pack(&self) -> Result<(Packager, Option<Precision>)> {
        let strategy: Strategy = self.strategy.parse()?;
        let precision = self.precision.map(Precision::new).transpose()?;
        let bins = self
            .bins
            .iter()
            .map(CuboidSpec::to_bin)
            .collect::<Result<Vec<_>>>()?;
        let items = self
            .items
            .iter()
            .map(CuboidSpec::to_item)
            .collect::<Result<Vec<_>>>()?;

        let mut packager = Packager::new(self.sort);
        packager.add_bins(bins)?;
        packager.add_items(items)?;
        packager.with_strategy(strategy).pack();

        Ok((packager, precision))
    }

    pub fn run(&self) -> Result<PackingReport> {
        let (packager, precision) = self.pack()?;
        Ok(PackingReport::from_packager(&packager, precision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_job_with_numeric_ids() {
        let job: PackJob = serde_json::from_str(
            r#"{
                "bins": [{"id": 1, "length": 4, "height": 4, "breadth": 5, "weight": 50}],
                "items": [{"id": "a", "length": 1, "height": 2, "breadth": 3, "weight": 5}],
                "sort": -1
            }"#,
        )
        .unwrap();
        assert_eq!(job.bins[0].id, "1");
        assert_eq!(job.strategy, "first-fit");
        assert_eq!(job.sort, SortDirection::Descending);
        assert_eq!(job.precision, None);
    }

    #[test]
    fn test_invalid_sort_rejected() {
        let res: std::result::Result<PackJob, _> = serde_json::from_str(
            r#"{"bins": [], "items": [], "sort": 3}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_sort_as_text() {
        let job: PackJob =
            serde_json::from_str(r#"{"bins": [], "items": [], "sort": "asc"}"#).unwrap();
        assert_eq!(job.sort, SortDirection::Ascending);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let spec = CuboidSpec::new("b", 0.0, 1.0, 1.0, 1.0);
        assert!(matches!(
            spec.to_bin(),
            Err(Error::InvalidDimension { id, .. }) if id == "b"
        ));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let spec = CuboidSpec::new("i", 1.0, 1.0, 1.0, -2.0);
        assert_eq!(
            spec.to_item(),
            Err(Error::InvalidWeight {
                id: "i".to_string(),
                weight: -2.0
            })
        );
    }

    #[test]
    fn test_run() {
        let job = PackJob {
            bins: vec![
                CuboidSpec::new("small", 2.0, 2.0, 2.0, 100.0),
                CuboidSpec::new("large", 5.0, 5.0, 5.0, 100.0),
            ],
            items: vec![CuboidSpec::new("big", 4.0, 4.0, 4.0, 1.0)],
            strategy: "first-fit-decreasing".to_string(),
            sort: SortDirection::Ascending,
            precision: Some(2),
        };
        let report = job.run().unwrap();
        assert_eq!(report.bins[0].id, "large");
        assert_eq!(report.fitted_count(), 1);
        assert!(report.unfitted_items.is_empty());
    }

    #[test]
    fn test_run_rejects_before_packing() {
        let mut job = PackJob {
            bins: vec![CuboidSpec::new("1", 2.0, 2.0, 2.0, 100.0)],
            items: vec![
                CuboidSpec::new("a", 1.0, 1.0, 1.0, 1.0),
                CuboidSpec::new("a", 1.0, 1.0, 1.0, 1.0),
            ],
            strategy: "first-fit".to_string(),
            sort: SortDirection::Descending,
            precision: None,
        };
        assert_eq!(job.run().unwrap_err(), Error::DuplicateItemId("a".to_string()));

        job.items.pop();
        job.precision = Some(-1);
        assert_eq!(job.run().unwrap_err(), Error::NegativePrecision(-1));
    }
}
