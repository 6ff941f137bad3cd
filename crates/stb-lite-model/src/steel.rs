// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Steel-shape catalog
//!
//! Steel figures name their shape by catalog name. The catalog is split into
//! one table per shape family; lookups search the tables in a fixed order
//! and the first match wins.

use serde::{Deserialize, Serialize};

use crate::{Field, Inspect, Result};

/// Declares a catalog shape made of a name, an optional type code and
/// numeric dimensions in millimetres
macro_rules! steel_shape {
    ($(#[$meta:meta])* $name:ident, $type_name:literal { $($field:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            pub name: String,
            #[serde(rename = "type", default)]
            pub kind: Option<String>,
            $(
                #[serde(rename = $key)]
                pub $field: f64,
            )+
        }

        impl Inspect for $name {
            fn type_name(&self) -> &'static str {
                $type_name
            }

            fn fields(&self) -> Result<Vec<Field<'_>>> {
                Ok(vec![
                    Field::attr("name", &self.name),
                    Field::optional("type", self.kind.as_ref()),
                    $(Field::attr($key, self.$field),)+
                ])
            }

            fn name_value(&self) -> Option<&str> {
                Some(&self.name)
            }
        }
    };
}

steel_shape!(
    /// Rolled H shape
    StbSecRollH, "StbSecRoll-H" { a => "A", b => "B", t1 => "t1", t2 => "t2", r => "r" }
);
steel_shape!(
    /// Built-up H shape
    StbSecBuildH, "StbSecBuild-H" { a => "A", b => "B", t1 => "t1", t2 => "t2" }
);
steel_shape!(
    /// Rolled box shape
    StbSecRollBox, "StbSecRoll-BOX" { a => "A", b => "B", t => "t", r => "r" }
);
steel_shape!(
    /// Built-up box shape
    StbSecBuildBox, "StbSecBuild-BOX" { a => "A", b => "B", t1 => "t1", t2 => "t2" }
);
steel_shape!(
    /// Round pipe
    StbSecPipe, "StbSecPipe" { d => "D", t => "t" }
);
steel_shape!(StbSecRollT, "StbSecRoll-T" { a => "A", b => "B", t1 => "t1", t2 => "t2", r => "r" });
steel_shape!(StbSecRollC, "StbSecRoll-C" { a => "A", b => "B", t1 => "t1", t2 => "t2", r1 => "r1", r2 => "r2" });
steel_shape!(StbSecRollL, "StbSecRoll-L" { a => "A", b => "B", t1 => "t1", t2 => "t2", r1 => "r1", r2 => "r2" });
steel_shape!(
    /// Light-gauge lipped channel
    StbSecLipC, "StbSecLipC" { h => "H", a => "A", c => "C", t => "t" }
);
steel_shape!(StbSecFlatBar, "StbSecFlatBar" { b => "B", t => "t" });
steel_shape!(StbSecRoundBar, "StbSecRoundBar" { r => "R" });

/// Proprietary product identified by manufacturer code
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecSteelProduct {
    pub name: String,
    #[serde(default)]
    pub product_company: Option<String>,
    pub product_code: String,
}

impl Inspect for StbSecSteelProduct {
    fn type_name(&self) -> &'static str {
        "StbSecSteelProduct"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("name", &self.name),
            Field::optional("product_company", self.product_company.as_ref()),
            Field::attr("product_code", &self.product_code),
        ])
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// Shape known only by its section properties
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecSteelUndefined {
    pub name: String,
    #[serde(rename = "A", default)]
    pub area: Option<f64>,
    #[serde(rename = "Ix", default)]
    pub moment_x: Option<f64>,
    #[serde(rename = "Iy", default)]
    pub moment_y: Option<f64>,
}

impl Inspect for StbSecSteelUndefined {
    fn type_name(&self) -> &'static str {
        "StbSecSteelUndefined"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("name", &self.name),
            Field::optional("A", self.area),
            Field::optional("Ix", self.moment_x),
            Field::optional("Iy", self.moment_y),
        ])
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// Steel-shape catalog
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbSecSteel {
    #[serde(rename = "StbSecRoll-H", default)]
    pub roll_h: Vec<StbSecRollH>,
    #[serde(rename = "StbSecBuild-H", default)]
    pub build_h: Vec<StbSecBuildH>,
    #[serde(rename = "StbSecRoll-BOX", default)]
    pub roll_box: Vec<StbSecRollBox>,
    #[serde(rename = "StbSecBuild-BOX", default)]
    pub build_box: Vec<StbSecBuildBox>,
    #[serde(rename = "StbSecPipe", default)]
    pub pipe: Vec<StbSecPipe>,
    #[serde(rename = "StbSecRoll-T", default)]
    pub roll_t: Vec<StbSecRollT>,
    #[serde(rename = "StbSecRoll-C", default)]
    pub roll_c: Vec<StbSecRollC>,
    #[serde(rename = "StbSecRoll-L", default)]
    pub roll_l: Vec<StbSecRollL>,
    #[serde(rename = "StbSecLipC", default)]
    pub lip_c: Vec<StbSecLipC>,
    #[serde(rename = "StbSecFlatBar", default)]
    pub flat_bar: Vec<StbSecFlatBar>,
    #[serde(rename = "StbSecRoundBar", default)]
    pub round_bar: Vec<StbSecRoundBar>,
    #[serde(rename = "StbSecSteelProduct", default)]
    pub product: Vec<StbSecSteelProduct>,
    #[serde(rename = "StbSecSteelUndefined", default)]
    pub undefined: Vec<StbSecSteelUndefined>,
}

fn by_name<'a, T: Inspect>(items: &'a [T], name: &str) -> Option<&'a dyn Inspect> {
    items
        .iter()
        .find(|item| item.name_value() == Some(name))
        .map(|item| item as &dyn Inspect)
}

impl StbSecSteel {
    /// First catalog entry with the given name
    ///
    /// Tables are searched in the order rolled H, built H, rolled box,
    /// built box, pipe, T, C, L, lipped C, flat bar, round bar, product,
    /// undefined.
    pub fn find_shape(&self, name: &str) -> Option<&dyn Inspect> {
        by_name(&self.roll_h, name)
            .or_else(|| by_name(&self.build_h, name))
            .or_else(|| by_name(&self.roll_box, name))
            .or_else(|| by_name(&self.build_box, name))
            .or_else(|| by_name(&self.pipe, name))
            .or_else(|| by_name(&self.roll_t, name))
            .or_else(|| by_name(&self.roll_c, name))
            .or_else(|| by_name(&self.roll_l, name))
            .or_else(|| by_name(&self.lip_c, name))
            .or_else(|| by_name(&self.flat_bar, name))
            .or_else(|| by_name(&self.round_bar, name))
            .or_else(|| by_name(&self.product, name))
            .or_else(|| by_name(&self.undefined, name))
    }
}

impl Inspect for StbSecSteel {
    fn type_name(&self) -> &'static str {
        "StbSecSteel"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::list("StbSecRoll-H", &self.roll_h),
            Field::list("StbSecBuild-H", &self.build_h),
            Field::list("StbSecRoll-BOX", &self.roll_box),
            Field::list("StbSecBuild-BOX", &self.build_box),
            Field::list("StbSecPipe", &self.pipe),
            Field::list("StbSecRoll-T", &self.roll_t),
            Field::list("StbSecRoll-C", &self.roll_c),
            Field::list("StbSecRoll-L", &self.roll_l),
            Field::list("StbSecLipC", &self.lip_c),
            Field::list("StbSecFlatBar", &self.flat_bar),
            Field::list("StbSecRoundBar", &self.round_bar),
            Field::list("StbSecSteelProduct", &self.product),
            Field::list("StbSecSteelUndefined", &self.undefined),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_shape_order() {
        let steel: StbSecSteel = serde_json::from_str(
            r#"{
                "StbSecPipe":[{"name":"P-1","D":216.3,"t":8.2}],
                "StbSecRoll-H":[{"name":"H-1","type":"H","A":400.0,"B":200.0,"t1":8.0,"t2":13.0,"r":16.0}],
                "StbSecBuild-H":[{"name":"H-1","A":500.0,"B":250.0,"t1":9.0,"t2":16.0}]
            }"#,
        )
        .unwrap();
        assert_eq!(steel.find_shape("H-1").unwrap().type_name(), "StbSecRoll-H");
        assert_eq!(steel.find_shape("P-1").unwrap().type_name(), "StbSecPipe");
        assert!(steel.find_shape("L-1").is_none());
    }

    #[test]
    fn test_shape_fields() {
        let pipe = StbSecPipe {
            name: "P-1".into(),
            kind: None,
            d: 216.3,
            t: 8.2,
        };
        let fields = pipe.fields().unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["name", "type", "D", "t"]);
    }
}
