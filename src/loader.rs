// 📂 Scenario Loader - JSON / CSV → Museum
//
// A scenario is a museum name, its exhibits, and the patrons to admit in
// order. Exhibits are all added before the first admission.
//
// CSV layout:
//   exhibits.csv  Name,Cost
//   patrons.csv   Name,Spending_Money,Interests   (interests split on ';')

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use crate::attendance::AdmissionReport;
use crate::entities::{Exhibit, Money, Patron};
use crate::error::MuseumResult;
use crate::museum::Museum;

// ============================================================================
// RECORDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhibitRecord {
    pub name: String,
    pub cost: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatronRecord {
    pub name: String,
    pub spending_money: Money,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// One row of exhibits.csv
#[derive(Debug, Deserialize)]
struct ExhibitRow {
    #[serde(rename = "Name")]
    name: String,

    #[serde(rename = "Cost")]
    cost: Money,
}

impl From<ExhibitRow> for ExhibitRecord {
    fn from(row: ExhibitRow) -> Self {
        ExhibitRecord {
            name: row.name,
            cost: row.cost,
        }
    }
}

/// One row of patrons.csv
#[derive(Debug, Deserialize)]
struct PatronRow {
    #[serde(rename = "Name")]
    name: String,

    #[serde(rename = "Spending_Money")]
    spending_money: Money,

    #[serde(rename = "Interests", default)]
    interests: String,
}

impl From<PatronRow> for PatronRecord {
    fn from(row: PatronRow) -> Self {
        PatronRecord {
            name: row.name,
            spending_money: row.spending_money,
            interests: row
                .interests
                .split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

// ============================================================================
// SCENARIO
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub museum: String,
    #[serde(default)]
    pub exhibits: Vec<ExhibitRecord>,
    #[serde(default)]
    pub patrons: Vec<PatronRecord>,
}

impl Scenario {
    /// Denver Museum of Nature and Science: three exhibits, four patrons.
    ///
    /// Ends with revenue 35: Bob and Morgan see the scrolls, Sally sees
    /// IMAX, Morgan also sees the free gems, TJ can't afford anything.
    pub fn dmns() -> Self {
        fn exhibit(name: &str, cost: Money) -> ExhibitRecord {
            ExhibitRecord { name: name.to_string(), cost }
        }

        fn patron(name: &str, spending_money: Money, interests: &[&str]) -> PatronRecord {
            PatronRecord {
                name: name.to_string(),
                spending_money,
                interests: interests.iter().map(|s| s.to_string()).collect(),
            }
        }

        Scenario {
            museum: "Denver Museum of Nature and Science".to_string(),
            exhibits: vec![
                exhibit("Gems and Minerals", 0),
                exhibit("Dead Sea Scrolls", 10),
                exhibit("IMAX", 15),
            ],
            patrons: vec![
                patron("TJ", 7, &["IMAX", "Dead Sea Scrolls"]),
                patron("Bob", 10, &["Dead Sea Scrolls", "IMAX"]),
                patron("Sally", 20, &["IMAX", "Dead Sea Scrolls"]),
                patron("Morgan", 15, &["Gems and Minerals", "Dead Sea Scrolls"]),
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scenario JSON")
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn from_csv_readers<E: Read, P: Read>(
        museum: &str,
        exhibits: E,
        patrons: P,
    ) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(exhibits);
        let mut exhibit_records = Vec::new();
        for result in rdr.deserialize() {
            let row: ExhibitRow = result.context("Failed to deserialize exhibit")?;
            exhibit_records.push(ExhibitRecord::from(row));
        }

        let mut rdr = csv::Reader::from_reader(patrons);
        let mut patron_records = Vec::new();
        for result in rdr.deserialize() {
            let row: PatronRow = result.context("Failed to deserialize patron")?;
            patron_records.push(PatronRecord::from(row));
        }

        Ok(Scenario {
            museum: museum.to_string(),
            exhibits: exhibit_records,
            patrons: patron_records,
        })
    }

    pub fn load_csv(museum: &str, exhibits_path: &Path, patrons_path: &Path) -> Result<Self> {
        let exhibits = std::fs::File::open(exhibits_path)
            .with_context(|| format!("Failed to open {}", exhibits_path.display()))?;
        let patrons = std::fs::File::open(patrons_path)
            .with_context(|| format!("Failed to open {}", patrons_path.display()))?;
        Self::from_csv_readers(museum, exhibits, patrons)
    }

    /// Build the museum and admit every patron in order.
    ///
    /// Fails before any admission if a record is invalid.
    pub fn run(&self) -> MuseumResult<(Museum, Vec<AdmissionReport>)> {
        let exhibits = self
            .exhibits
            .iter()
            .map(|e| Exhibit::new(e.name.clone(), e.cost))
            .collect::<MuseumResult<Vec<_>>>()?;
        let patrons = self
            .patrons
            .iter()
            .map(|p| {
                Patron::new(p.name.clone(), p.spending_money)
                    .map(|patron| patron.with_interests(p.interests.iter().cloned()))
            })
            .collect::<MuseumResult<Vec<_>>>()?;

        let mut museum = Museum::new(self.museum.clone());
        for exhibit in exhibits {
            museum.add_exhibit(exhibit);
        }
        let reports: Vec<AdmissionReport> = patrons.into_iter().map(|p| museum.admit(p)).collect();

        Ok((museum, reports))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MuseumError;
    use std::io::Write;

    #[test]
    fn test_dmns_scenario_run() {
        let (museum, reports) = Scenario::dmns().run().unwrap();

        assert_eq!(museum.revenue(), 35);
        assert_eq!(reports.len(), 4);
        let remaining: Vec<Money> = reports.iter().map(|r| r.remaining_money).collect();
        assert_eq!(remaining, vec![7, 0, 5, 5]);
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "museum": "Field Museum",
            "exhibits": [{ "name": "SUE the T. rex", "cost": 25 }],
            "patrons": [
                { "name": "Ana", "spending_money": 30, "interests": ["SUE the T. rex"] },
                { "name": "Lee", "spending_money": 5 }
            ]
        }"#;

        let scenario = Scenario::from_json_str(json).unwrap();
        assert_eq!(scenario.exhibits[0].cost, 25);
        assert!(scenario.patrons[1].interests.is_empty());

        let (museum, _) = scenario.run().unwrap();
        assert_eq!(museum.revenue(), 25);
    }

    #[test]
    fn test_bad_json() {
        let err = Scenario::from_json_str("{ not json").unwrap_err();
        assert!(err.to_string().contains("Failed to parse scenario JSON"));
    }

    #[test]
    fn test_from_csv_readers() {
        let exhibits = "Name,Cost\nGems and Minerals,0\nIMAX,15\n";
        let patrons = "Name,Spending_Money,Interests\n\
                       Sally,20,IMAX; Gems and Minerals\n\
                       TJ,7,\n";

        let scenario =
            Scenario::from_csv_readers("DMNS", exhibits.as_bytes(), patrons.as_bytes()).unwrap();

        assert_eq!(scenario.exhibits.len(), 2);
        assert_eq!(scenario.patrons[0].interests, vec!["IMAX", "Gems and Minerals"]);
        assert!(scenario.patrons[1].interests.is_empty());

        let (museum, _) = scenario.run().unwrap();
        assert_eq!(museum.revenue(), 15);
    }

    #[test]
    fn test_csv_headers_are_capitalised() {
        let exhibits = "name,cost\nIMAX,15\n";
        let patrons = "Name,Spending_Money,Interests\n";

        let err = Scenario::from_csv_readers("DMNS", exhibits.as_bytes(), patrons.as_bytes())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to deserialize exhibit"));
    }

    #[test]
    fn test_csv_bad_cost() {
        let exhibits = "Name,Cost\nIMAX,fifteen\n";
        let patrons = "Name,Spending_Money,Interests\n";

        let err = Scenario::from_csv_readers("DMNS", exhibits.as_bytes(), patrons.as_bytes())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to deserialize exhibit"));
    }

    #[test]
    fn test_run_rejects_negative_cost() {
        let mut scenario = Scenario::dmns();
        scenario.exhibits.push(ExhibitRecord { name: "Refund Booth".to_string(), cost: -5 });

        assert_eq!(
            scenario.run().unwrap_err(),
            MuseumError::InvalidArgument { field: "cost", value: -5 }
        );
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&Scenario::dmns()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let scenario = Scenario::load_json(file.path()).unwrap();
        assert_eq!(scenario, Scenario::dmns());
    }

    #[test]
    fn test_load_json_missing_file() {
        let err = Scenario::load_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read scenario file"));
    }

    #[test]
    fn test_load_csv_files() {
        let dir = tempfile::tempdir().unwrap();
        let exhibits_path = dir.path().join("exhibits.csv");
        let patrons_path = dir.path().join("patrons.csv");
        std::fs::write(&exhibits_path, "Name,Cost\nDead Sea Scrolls,10\n").unwrap();
        std::fs::write(&patrons_path, "Name,Spending_Money,Interests\nBob,10,Dead Sea Scrolls\n")
            .unwrap();

        let scenario = Scenario::load_csv("DMNS", &exhibits_path, &patrons_path).unwrap();
        let (museum, reports) = scenario.run().unwrap();

        assert_eq!(museum.revenue(), 10);
        assert_eq!(reports[0].remaining_money, 0);
    }
}
