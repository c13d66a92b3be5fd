// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::plan_nodes::ConstantType;
use crate::properties::schema::{Catalog, Field, Schema};

/// A slice of the TPC-H tables plus an `events` table for funnel queries.
pub struct TpchCatalog;

impl TpchCatalog {
    pub const TABLES: &'static [&'static str] = &["lineitem", "partsupp", "orders", "events"];
}

fn table(columns: &[(&str, ConstantType, bool)]) -> Schema {
    Schema::new(
        columns
            .iter()
            .map(|(name, typ, nullable)| Field::new(*name, *typ, *nullable))
            .collect(),
    )
}

impl Catalog for TpchCatalog {
    fn get(&self, name: &str) -> Option<Schema> {
        use ConstantType::*;
        let schema = match name {
            "lineitem" => table(&[
                ("orderkey", Int64, false),
                ("partkey", Int64, false),
                ("suppkey", Int64, false),
                ("linenumber", Int32, false),
                ("quantity", Decimal, false),
                ("extendedprice", Decimal, false),
                ("discount", Decimal, false),
                ("tax", Decimal, false),
                ("returnflag", Utf8String, false),
                ("linestatus", Utf8String, false),
                ("shipdate", DateV2, false),
                ("commitdate", DateV2, false),
                ("receiptdate", DateV2, false),
                ("shipinstruct", Utf8String, false),
                ("shipmode", Utf8String, false),
                ("comment", Utf8String, false),
            ]),
            "partsupp" => table(&[
                ("partkey", Int64, false),
                ("suppkey", Int64, false),
                ("availqty", Int32, false),
                ("supplycost", Decimal, false),
                ("comment", Utf8String, false),
            ]),
            "orders" => table(&[
                ("orderkey", Int64, false),
                ("custkey", Int64, false),
                ("orderstatus", Utf8String, false),
                ("totalprice", Decimal, false),
                ("orderdate", DateV2, false),
                ("orderpriority", Utf8String, false),
                ("clerk", Utf8String, false),
                ("shippriority", Int32, false),
                ("comment", Utf8String, false),
            ]),
            "events" => table(&[
                ("user_id", Int64, false),
                ("event_date", Date, false),
                ("event_time", DateTimeV2(3), false),
                ("event_type", Utf8String, false),
                ("viewed", Bool, false),
                ("purchased", Bool, true),
            ]),
            _ => return None,
        };
        Some(schema)
    }
}
