use serde::{Deserialize, Serialize};

use super::aggregate::Carton;

/// Summary statistics over the current carton collection. Always recomputed
/// from the sequence itself; nothing here is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartonStats {
    #[serde(rename = "totalCartons")]
    pub total_cartons: usize,
    #[serde(rename = "totalPieces")]
    pub total_pieces: i64,
    #[serde(rename = "distinctStores")]
    pub distinct_stores: usize,
}

/// Recompute the dashboard statistics from scratch.
pub fn summarize(cartons: &[Carton]) -> CartonStats {
    let total_pieces = cartons.iter().map(|c| c.total_pieces).sum();
    let mut stores: Vec<&str> = cartons.iter().map(|c| c.store_name.as_str()).collect();
    stores.sort_unstable();
    stores.dedup();

    CartonStats {
        total_cartons: cartons.len(),
        total_pieces,
        distinct_stores: stores.len(),
    }
}

/// Case-insensitive substring search over carton number, buyer and store
/// name. An empty term returns the collection unchanged, in order.
pub fn filter(cartons: &[Carton], term: &str) -> Vec<Carton> {
    if term.is_empty() {
        return cartons.to_vec();
    }
    let term = term.to_lowercase();
    cartons
        .iter()
        .filter(|c| {
            c.carton_no.to_lowercase().contains(&term)
                || c.buyer.display_name().to_lowercase().contains(&term)
                || c.store_name.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_carton::{Carton, CartonRow, NewCartonEntry};

    fn carton(carton_no: &str, buyer: &str, store: &str, pieces: u32) -> Carton {
        let mut row = CartonRow::new("FLORAL", "ST-01");
        row.quantities.insert("M".into(), pieces);
        Carton::commit(
            NewCartonEntry {
                buyer: buyer.into(),
                store_name: store.into(),
                rows: vec![row],
                carton_no: carton_no.into(),
                net_weight: "4.5".into(),
                gross_weight: "5".into(),
                carton_dimension: "".into(),
            },
            "SS24".into(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(
            summarize(&[]),
            CartonStats {
                total_cartons: 0,
                total_pieces: 0,
                distinct_stores: 0
            }
        );
    }

    #[test]
    fn test_summarize_counts_distinct_stores() {
        let cartons = vec![carton("1", "DUNS", "X", 10), carton("2", "DUNS", "X", 15)];
        assert_eq!(
            summarize(&cartons),
            CartonStats {
                total_cartons: 2,
                total_pieces: 25,
                distinct_stores: 1
            }
        );
    }

    #[test]
    fn test_filter_empty_term_is_identity() {
        let cartons = vec![carton("1", "DUNS", "X", 1), carton("2", "DUNS", "Y", 2)];
        let out = filter(&cartons, "");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].carton_no, "1");
        assert_eq!(out[1].carton_no, "2");
    }

    #[test]
    fn test_filter_is_case_insensitive_over_three_fields() {
        let cartons = vec![
            carton("101", "DUNS", "Chennai Central", 1),
            carton("202", "MORE THAN A FLINGS", "Mumbai North", 2),
        ];

        assert_eq!(filter(&cartons, "chennai").len(), 1);
        assert_eq!(filter(&cartons, "FLINGS").len(), 1);
        assert_eq!(filter(&cartons, "duns").len(), 1);
        assert_eq!(filter(&cartons, "0").len(), 2);
        assert_eq!(filter(&cartons, "no-match").len(), 0);
    }
}
