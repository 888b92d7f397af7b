use serde_json::{json, Value as JsonValue};

use crate::db::resources::CategoryTreeNode;

fn product(id: &str, path: &str) -> JsonValue {
    json!({ "id": id, "path": path, "sku": path.to_uppercase(), "name": path })
}

fn leaf(segment: &str, products: Vec<JsonValue>) -> JsonValue {
    json!({
        "segment": segment,
        "name": segment.to_uppercase(),
        "categories": { "object": "list", "data": [] },
        "products": { "object": "list", "data": products }
    })
}

fn node(segment: &str, name: &str, children: Vec<JsonValue>) -> JsonValue {
    json!({
        "segment": segment,
        "name": name,
        "categories": { "object": "list", "data": children }
    })
}

/// `a > {b > {e}, c > {f > {i, j > {m, n}}, g}, d > {h > {k, l}}}` with
/// products only on the leaves. `gift-card` is listed by both `e` and `k`.
pub fn scenario_tree_json() -> JsonValue {
    node(
        "a",
        "All",
        vec![
            node(
                "b",
                "B",
                vec![leaf("e", vec![product("p1", "boot"), product("p9", "gift-card")])],
            ),
            node(
                "c",
                "C",
                vec![
                    node(
                        "f",
                        "F",
                        vec![
                            leaf("i", vec![product("p2", "sock")]),
                            node(
                                "j",
                                "J",
                                vec![
                                    leaf("m", vec![product("p3", "lace")]),
                                    leaf("n", vec![product("p4", "insole")]),
                                ],
                            ),
                        ],
                    ),
                    leaf("g", vec![product("p5", "polish")]),
                ],
            ),
            node(
                "d",
                "D",
                vec![node(
                    "h",
                    "H",
                    vec![
                        leaf("k", vec![product("p6", "brush"), product("p9", "gift-card")]),
                        leaf("l", vec![product("p7", "tree")]),
                    ],
                )],
            ),
        ],
    )
}

pub fn scenario_tree() -> CategoryTreeNode {
    serde_json::from_value(scenario_tree_json()).unwrap()
}
