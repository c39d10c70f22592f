use crate::normalize::ResultRecord;
use crate::normalize::rows;
use proptest::prelude::*;
use serde_json::Value as JsonValue;
use serde_json::json;

fn record(entries: &[(&str, JsonValue)]) -> ResultRecord {
    entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

mod basics {
    use super::*;

    #[test]
    fn single_object_is_one_row() {
        let data = json!({ "market": { "name": "Uniswap", "tvl": 1.5 } });
        assert_eq!(rows(&data), vec![record(&[
            ("market.name", json!("Uniswap")),
            ("market.tvl", json!(1.5)),
        ])]);
    }

    #[test]
    fn each_list_element_is_a_row() {
        let data = json!({
            "pairs": [
                { "id": "a", "token0": { "symbol": "WETH" } },
                { "id": "b", "token0": { "symbol": "DAI" } },
            ],
        });

        assert_eq!(rows(&data), vec![
            record(&[("pairs.id", json!("a")), ("pairs.token0.symbol", json!("WETH"))]),
            record(&[("pairs.id", json!("b")), ("pairs.token0.symbol", json!("DAI"))]),
        ]);
    }

    #[test]
    fn nested_lists_repeat_parent_values() {
        let data = json!({
            "pairs": [
                { "id": "a", "swaps": [{ "id": "s1" }, { "id": "s2" }] },
                { "id": "b", "swaps": [] },
            ],
        });

        assert_eq!(rows(&data), vec![
            record(&[("pairs.id", json!("a")), ("pairs.swaps.id", json!("s1"))]),
            record(&[("pairs.id", json!("a")), ("pairs.swaps.id", json!("s2"))]),
            record(&[("pairs.id", json!("b"))]),
        ]);
    }

    #[test]
    fn sibling_lists_form_a_cartesian_product() {
        let data = json!({
            "pairs": [{ "id": "a" }, { "id": "b" }],
            "tokens": [{ "symbol": "X" }, { "symbol": "Y" }, { "symbol": "Z" }],
            "market": { "name": "M" },
        });

        let result = rows(&data);
        assert_eq!(result.len(), 6);
        assert_eq!(result[0], record(&[
            ("pairs.id", json!("a")),
            ("tokens.symbol", json!("X")),
            ("market.name", json!("M")),
        ]));
        assert_eq!(result[5], record(&[
            ("pairs.id", json!("b")),
            ("tokens.symbol", json!("Z")),
            ("market.name", json!("M")),
        ]));
        assert!(result.iter().all(|row| row["market.name"] == json!("M")));
    }

    #[test]
    fn scalar_lists_are_single_values() {
        let data = json!({ "tokenSymbols": ["WETH", "USDC"], "market": null });
        assert_eq!(rows(&data), vec![record(&[
            ("tokenSymbols", json!(["WETH", "USDC"])),
            ("market", json!(null)),
        ])]);
    }

    #[test]
    fn empty_top_level_list_has_no_rows() {
        assert!(rows(&json!([])).is_empty());
        assert_eq!(rows(&json!({ "pairs": [] })), vec![ResultRecord::new()]);
    }
}

fn objects(prefix: &str, count: usize) -> JsonValue {
    JsonValue::Array(
        (0..count).map(|idx| json!({ "id": format!("{prefix}{idx}") })).collect(),
    )
}

proptest! {
    #[test]
    fn row_count_is_the_product_of_list_lengths(
        pair_count in 0usize..5,
        token_count in 0usize..5,
    ) {
        let data = json!({
            "pairs": objects("p", pair_count),
            "tokens": objects("t", token_count),
        });

        let result = rows(&data);
        prop_assert_eq!(result.len(), pair_count.max(1) * token_count.max(1));
        for row in &result {
            prop_assert_eq!(row.contains_key("pairs.id"), pair_count > 0);
            prop_assert_eq!(row.contains_key("tokens.id"), token_count > 0);
        }
    }
}
