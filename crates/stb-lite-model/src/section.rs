// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cross-section catalog
//!
//! Figure wrappers hold a choice of shapes (`Items`) whose entries are
//! hoisted into the owning section when shown in the tree.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::{Field, Inspect, Result, StbSecSteel, Table};

/// Delegates [`Inspect`] of a choice enum to its payload
macro_rules! inspect_choice {
    ($name:ident { $($variant:ident),+ $(,)? }) => {
        impl Inspect for $name {
            fn type_name(&self) -> &'static str {
                match self {
                    $($name::$variant(inner) => inner.type_name(),)+
                }
            }

            fn fields(&self) -> Result<Vec<Field<'_>>> {
                match self {
                    $($name::$variant(inner) => inner.fields(),)+
                }
            }
        }
    };
}

// ============================================================================
// Column
// ============================================================================

/// RC column section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecColumnRc {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub strength_concrete: String,
    #[serde(rename = "StbSecFigureColumn_RC")]
    pub figure: StbSecFigureColumnRc,
}

impl Inspect for StbSecColumnRc {
    fn type_name(&self) -> &'static str {
        "StbSecColumn_RC"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("strength_concrete", &self.strength_concrete),
            Field::object("StbSecFigureColumn_RC", &self.figure),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbSecFigureColumnRc {
    #[serde(rename = "Items", default)]
    pub items: Vec<ColumnRcShape>,
}

impl Inspect for StbSecFigureColumnRc {
    fn type_name(&self) -> &'static str {
        "StbSecFigureColumn_RC"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::items(&self.items)])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ColumnRcShape {
    #[serde(rename = "StbSecColumn_RC_Rect")]
    Rect(StbSecColumnRcRect),
    #[serde(rename = "StbSecColumn_RC_Circle")]
    Circle(StbSecColumnRcCircle),
}

inspect_choice!(ColumnRcShape { Rect, Circle });

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecColumnRcRect {
    #[serde(rename = "width_X")]
    pub width_x: f64,
    #[serde(rename = "width_Y")]
    pub width_y: f64,
}

impl Inspect for StbSecColumnRcRect {
    fn type_name(&self) -> &'static str {
        "StbSecColumn_RC_Rect"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("width_X", self.width_x),
            Field::attr("width_Y", self.width_y),
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecColumnRcCircle {
    #[serde(rename = "D")]
    pub diameter: f64,
}

impl Inspect for StbSecColumnRcCircle {
    fn type_name(&self) -> &'static str {
        "StbSecColumn_RC_Circle"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::attr("D", self.diameter)])
    }
}

/// Marker for steel figure parts that share a layout
pub trait SteelPartTag {
    const TYPE_NAME: &'static str;
}

macro_rules! steel_part_tag {
    ($tag:ident, $type_name:literal) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        pub struct $tag;

        impl SteelPartTag for $tag {
            const TYPE_NAME: &'static str = $type_name;
        }
    };
}

steel_part_tag!(ColumnSameTag, "StbSecSteelColumn_S_Same");
steel_part_tag!(ColumnNotSameTag, "StbSecSteelColumn_S_NotSame");
steel_part_tag!(BeamStraightTag, "StbSecSteelBeam_S_Straight");
steel_part_tag!(BeamHaunchTag, "StbSecSteelBeam_S_Haunch");
steel_part_tag!(BraceSameTag, "StbSecSteelBrace_S_Same");
steel_part_tag!(BraceNotSameTag, "StbSecSteelBrace_S_NotSame");

/// Steel figure part naming a catalog shape
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StbSecSteelPart<T: SteelPartTag> {
    /// Position along the member (`BOTTOM`, `TOP`, `START`, `CENTER`, `END`)
    #[serde(default)]
    pub pos: Option<String>,
    pub shape: String,
    pub strength_main: String,
    #[serde(default)]
    pub strength_web: Option<String>,
    #[serde(skip)]
    pub tag: PhantomData<T>,
}

impl<T: SteelPartTag> StbSecSteelPart<T> {
    pub fn new(shape: impl Into<String>, strength_main: impl Into<String>) -> Self {
        Self {
            pos: None,
            shape: shape.into(),
            strength_main: strength_main.into(),
            strength_web: None,
            tag: PhantomData,
        }
    }
}

impl<T: SteelPartTag> Inspect for StbSecSteelPart<T> {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::optional("pos", self.pos.as_ref()),
            Field::steel_shape("shape", &self.shape),
            Field::attr("strength_main", &self.strength_main),
            Field::optional("strength_web", self.strength_web.as_ref()),
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ColumnSteelShape {
    #[serde(rename = "StbSecSteelColumn_S_Same")]
    Same(StbSecSteelPart<ColumnSameTag>),
    #[serde(rename = "StbSecSteelColumn_S_NotSame")]
    NotSame(StbSecSteelPart<ColumnNotSameTag>),
}

inspect_choice!(ColumnSteelShape { Same, NotSame });

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbSecSteelFigureColumnS {
    #[serde(rename = "Items", default)]
    pub items: Vec<ColumnSteelShape>,
}

impl Inspect for StbSecSteelFigureColumnS {
    fn type_name(&self) -> &'static str {
        "StbSecSteelFigureColumn_S"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::items(&self.items)])
    }
}

/// Steel column section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecColumnS {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    #[serde(default)]
    pub base_type: Option<String>,
    #[serde(rename = "StbSecSteelFigureColumn_S")]
    pub figure: StbSecSteelFigureColumnS,
}

impl Inspect for StbSecColumnS {
    fn type_name(&self) -> &'static str {
        "StbSecColumn_S"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::optional("base_type", self.base_type.as_ref()),
            Field::object("StbSecSteelFigureColumn_S", &self.figure),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// Steel-reinforced concrete column section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecColumnSrc {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub strength_concrete: String,
    #[serde(rename = "StbSecFigureColumn_SRC")]
    pub figure: StbSecFigureColumnRc,
    #[serde(rename = "StbSecSteelFigureColumn_SRC")]
    pub steel_figure: StbSecSteelFigureColumnS,
}

impl Inspect for StbSecColumnSrc {
    fn type_name(&self) -> &'static str {
        "StbSecColumn_SRC"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("strength_concrete", &self.strength_concrete),
            Field::object("StbSecFigureColumn_SRC", &self.figure),
            Field::object("StbSecSteelFigureColumn_SRC", &self.steel_figure),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// Concrete-filled steel tube column section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecColumnCft {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub strength_concrete: String,
    #[serde(rename = "StbSecSteelFigureColumn_CFT")]
    pub steel_figure: StbSecSteelFigureColumnS,
}

impl Inspect for StbSecColumnCft {
    fn type_name(&self) -> &'static str {
        "StbSecColumn_CFT"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("strength_concrete", &self.strength_concrete),
            Field::object("StbSecSteelFigureColumn_CFT", &self.steel_figure),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

// ============================================================================
// Beam and brace
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecBeamRcStraight {
    pub depth: f64,
    pub width: f64,
}

impl Inspect for StbSecBeamRcStraight {
    fn type_name(&self) -> &'static str {
        "StbSecBeam_RC_Straight"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("depth", self.depth),
            Field::attr("width", self.width),
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecBeamRcHaunch {
    pub pos: String,
    pub depth: f64,
    pub width: f64,
}

impl Inspect for StbSecBeamRcHaunch {
    fn type_name(&self) -> &'static str {
        "StbSecBeam_RC_Haunch"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("pos", &self.pos),
            Field::attr("depth", self.depth),
            Field::attr("width", self.width),
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BeamRcShape {
    #[serde(rename = "StbSecBeam_RC_Straight")]
    Straight(StbSecBeamRcStraight),
    #[serde(rename = "StbSecBeam_RC_Haunch")]
    Haunch(StbSecBeamRcHaunch),
}

inspect_choice!(BeamRcShape { Straight, Haunch });

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbSecFigureBeamRc {
    #[serde(rename = "Items", default)]
    pub items: Vec<BeamRcShape>,
}

impl Inspect for StbSecFigureBeamRc {
    fn type_name(&self) -> &'static str {
        "StbSecFigureBeam_RC"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::items(&self.items)])
    }
}

/// RC beam section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecBeamRc {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub strength_concrete: String,
    #[serde(rename = "isFoundation", default)]
    pub is_foundation: Option<bool>,
    #[serde(rename = "StbSecFigureBeam_RC")]
    pub figure: StbSecFigureBeamRc,
}

impl Inspect for StbSecBeamRc {
    fn type_name(&self) -> &'static str {
        "StbSecBeam_RC"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("strength_concrete", &self.strength_concrete),
            Field::optional("isFoundation", self.is_foundation),
            Field::object("StbSecFigureBeam_RC", &self.figure),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BeamSteelShape {
    #[serde(rename = "StbSecSteelBeam_S_Straight")]
    Straight(StbSecSteelPart<BeamStraightTag>),
    #[serde(rename = "StbSecSteelBeam_S_Haunch")]
    Haunch(StbSecSteelPart<BeamHaunchTag>),
}

inspect_choice!(BeamSteelShape { Straight, Haunch });

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbSecSteelFigureBeamS {
    #[serde(rename = "Items", default)]
    pub items: Vec<BeamSteelShape>,
}

impl Inspect for StbSecSteelFigureBeamS {
    fn type_name(&self) -> &'static str {
        "StbSecSteelFigureBeam_S"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::items(&self.items)])
    }
}

/// Steel beam section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecBeamS {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    #[serde(rename = "StbSecSteelFigureBeam_S")]
    pub figure: StbSecSteelFigureBeamS,
}

impl Inspect for StbSecBeamS {
    fn type_name(&self) -> &'static str {
        "StbSecBeam_S"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::object("StbSecSteelFigureBeam_S", &self.figure),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// Steel-reinforced concrete beam section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecBeamSrc {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub strength_concrete: String,
    #[serde(rename = "StbSecFigureBeam_SRC")]
    pub figure: StbSecFigureBeamRc,
    #[serde(rename = "StbSecSteelFigureBeam_SRC")]
    pub steel_figure: StbSecSteelFigureBeamS,
}

impl Inspect for StbSecBeamSrc {
    fn type_name(&self) -> &'static str {
        "StbSecBeam_SRC"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("strength_concrete", &self.strength_concrete),
            Field::object("StbSecFigureBeam_SRC", &self.figure),
            Field::object("StbSecSteelFigureBeam_SRC", &self.steel_figure),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BraceSteelShape {
    #[serde(rename = "StbSecSteelBrace_S_Same")]
    Same(StbSecSteelPart<BraceSameTag>),
    #[serde(rename = "StbSecSteelBrace_S_NotSame")]
    NotSame(StbSecSteelPart<BraceNotSameTag>),
}

inspect_choice!(BraceSteelShape { Same, NotSame });

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbSecSteelFigureBraceS {
    #[serde(rename = "Items", default)]
    pub items: Vec<BraceSteelShape>,
}

impl Inspect for StbSecSteelFigureBraceS {
    fn type_name(&self) -> &'static str {
        "StbSecSteelFigureBrace_S"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::items(&self.items)])
    }
}

/// Steel brace section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecBraceS {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    #[serde(rename = "StbSecSteelFigureBrace_S")]
    pub figure: StbSecSteelFigureBraceS,
}

impl Inspect for StbSecBraceS {
    fn type_name(&self) -> &'static str {
        "StbSecBrace_S"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::object("StbSecSteelFigureBrace_S", &self.figure),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

// ============================================================================
// Slab, wall and parapet
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecSlabRcStraight {
    pub depth: f64,
}

impl Inspect for StbSecSlabRcStraight {
    fn type_name(&self) -> &'static str {
        "StbSecSlab_RC_Straight"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::attr("depth", self.depth)])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecSlabRcTaper {
    pub pos: String,
    pub depth: f64,
}

impl Inspect for StbSecSlabRcTaper {
    fn type_name(&self) -> &'static str {
        "StbSecSlab_RC_Taper"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("pos", &self.pos),
            Field::attr("depth", self.depth),
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SlabRcShape {
    #[serde(rename = "StbSecSlab_RC_Straight")]
    Straight(StbSecSlabRcStraight),
    #[serde(rename = "StbSecSlab_RC_Taper")]
    Taper(StbSecSlabRcTaper),
}

inspect_choice!(SlabRcShape { Straight, Taper });

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbSecFigureSlabRc {
    #[serde(rename = "Items", default)]
    pub items: Vec<SlabRcShape>,
}

impl Inspect for StbSecFigureSlabRc {
    fn type_name(&self) -> &'static str {
        "StbSecFigureSlab_RC"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::items(&self.items)])
    }
}

/// RC slab section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecSlabRc {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub strength_concrete: String,
    #[serde(rename = "StbSecFigureSlab_RC")]
    pub figure: StbSecFigureSlabRc,
}

impl Inspect for StbSecSlabRc {
    fn type_name(&self) -> &'static str {
        "StbSecSlab_RC"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("strength_concrete", &self.strength_concrete),
            Field::object("StbSecFigureSlab_RC", &self.figure),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecSlabDeckStraight {
    pub depth: f64,
}

impl Inspect for StbSecSlabDeckStraight {
    fn type_name(&self) -> &'static str {
        "StbSecSlabDeckStraight"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::attr("depth", self.depth)])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecProductSlabDeck {
    pub product_type: String,
    pub product_code: String,
    pub depth_deck: f64,
}

impl Inspect for StbSecProductSlabDeck {
    fn type_name(&self) -> &'static str {
        "StbSecProductSlabDeck"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("product_type", &self.product_type),
            Field::attr("product_code", &self.product_code),
            Field::attr("depth_deck", self.depth_deck),
        ])
    }
}

/// Composite deck slab section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecSlabDeck {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub strength_concrete: String,
    #[serde(default)]
    pub direction_deck: Option<String>,
    #[serde(rename = "StbSecSlabDeckStraight")]
    pub figure: StbSecSlabDeckStraight,
    #[serde(rename = "StbSecProductSlabDeck", default)]
    pub product: Option<StbSecProductSlabDeck>,
}

impl Inspect for StbSecSlabDeck {
    fn type_name(&self) -> &'static str {
        "StbSecSlabDeck"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("strength_concrete", &self.strength_concrete),
            Field::optional("direction_deck", self.direction_deck.as_ref()),
            Field::object("StbSecSlabDeckStraight", &self.figure),
            Field::optional_object("StbSecProductSlabDeck", self.product.as_ref()),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecProductSlabPrecast {
    pub product_type: String,
    pub product_code: String,
    pub depth_concrete: f64,
}

impl Inspect for StbSecProductSlabPrecast {
    fn type_name(&self) -> &'static str {
        "StbSecProductSlabPrecast"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("product_type", &self.product_type),
            Field::attr("product_code", &self.product_code),
            Field::attr("depth_concrete", self.depth_concrete),
        ])
    }
}

/// Precast slab section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecSlabPrecast {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub precast_type: String,
    pub strength_concrete: String,
    #[serde(rename = "StbSecProductSlabPrecast")]
    pub product: StbSecProductSlabPrecast,
}

impl Inspect for StbSecSlabPrecast {
    fn type_name(&self) -> &'static str {
        "StbSecSlabPrecast"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("precast_type", &self.precast_type),
            Field::attr("strength_concrete", &self.strength_concrete),
            Field::object("StbSecProductSlabPrecast", &self.product),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecWallRcStraight {
    pub t: f64,
}

impl Inspect for StbSecWallRcStraight {
    fn type_name(&self) -> &'static str {
        "StbSecWall_RC_Straight"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::attr("t", self.t)])
    }
}

/// RC wall section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecWallRc {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub strength_concrete: String,
    #[serde(rename = "StbSecWall_RC_Straight")]
    pub figure: StbSecWallRcStraight,
}

impl Inspect for StbSecWallRc {
    fn type_name(&self) -> &'static str {
        "StbSecWall_RC"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("strength_concrete", &self.strength_concrete),
            Field::object("StbSecWall_RC_Straight", &self.figure),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecParapetRcStraight {
    pub depth: f64,
    pub t: f64,
}

impl Inspect for StbSecParapetRcStraight {
    fn type_name(&self) -> &'static str {
        "StbSecParapet_RC_Straight"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::attr("depth", self.depth), Field::attr("t", self.t)])
    }
}

/// RC parapet section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecParapetRc {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub strength_concrete: String,
    #[serde(rename = "StbSecParapet_RC_Straight")]
    pub figure: StbSecParapetRcStraight,
}

impl Inspect for StbSecParapetRc {
    fn type_name(&self) -> &'static str {
        "StbSecParapet_RC"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("strength_concrete", &self.strength_concrete),
            Field::object("StbSecParapet_RC_Straight", &self.figure),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

// ============================================================================
// Foundation, pile and opening
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecFoundationRcRect {
    #[serde(rename = "width_X")]
    pub width_x: f64,
    #[serde(rename = "width_Y")]
    pub width_y: f64,
    pub depth: f64,
}

impl Inspect for StbSecFoundationRcRect {
    fn type_name(&self) -> &'static str {
        "StbSecFoundation_RC_Rect"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("width_X", self.width_x),
            Field::attr("width_Y", self.width_y),
            Field::attr("depth", self.depth),
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecFoundationRcContinuous {
    pub width: f64,
    pub depth: f64,
}

impl Inspect for StbSecFoundationRcContinuous {
    fn type_name(&self) -> &'static str {
        "StbSecFoundation_RC_Continuous"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("width", self.width),
            Field::attr("depth", self.depth),
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FoundationRcShape {
    #[serde(rename = "StbSecFoundation_RC_Rect")]
    Rect(StbSecFoundationRcRect),
    #[serde(rename = "StbSecFoundation_RC_Continuous")]
    Continuous(StbSecFoundationRcContinuous),
}

inspect_choice!(FoundationRcShape { Rect, Continuous });

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbSecFigureFoundationRc {
    #[serde(rename = "Items", default)]
    pub items: Vec<FoundationRcShape>,
}

impl Inspect for StbSecFigureFoundationRc {
    fn type_name(&self) -> &'static str {
        "StbSecFigureFoundation_RC"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::items(&self.items)])
    }
}

/// RC foundation section, shared by footings and strip footings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecFoundationRc {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub strength_concrete: String,
    #[serde(rename = "StbSecFigureFoundation_RC")]
    pub figure: StbSecFigureFoundationRc,
}

impl Inspect for StbSecFoundationRc {
    fn type_name(&self) -> &'static str {
        "StbSecFoundation_RC"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("strength_concrete", &self.strength_concrete),
            Field::object("StbSecFigureFoundation_RC", &self.figure),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecPileRcStraight {
    #[serde(rename = "D")]
    pub diameter: f64,
    pub length_pile: f64,
}

impl Inspect for StbSecPileRcStraight {
    fn type_name(&self) -> &'static str {
        "StbSecPile_RC_Straight"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("D", self.diameter),
            Field::attr("length_pile", self.length_pile),
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecPileRcExtBottom {
    #[serde(rename = "D_axial")]
    pub diameter_axial: f64,
    #[serde(rename = "D_extension_bottom")]
    pub diameter_extension: f64,
    pub length_pile: f64,
}

impl Inspect for StbSecPileRcExtBottom {
    fn type_name(&self) -> &'static str {
        "StbSecPile_RC_ExtBottom"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("D_axial", self.diameter_axial),
            Field::attr("D_extension_bottom", self.diameter_extension),
            Field::attr("length_pile", self.length_pile),
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PileRcShape {
    #[serde(rename = "StbSecPile_RC_Straight")]
    Straight(StbSecPileRcStraight),
    #[serde(rename = "StbSecPile_RC_ExtBottom")]
    ExtBottom(StbSecPileRcExtBottom),
}

inspect_choice!(PileRcShape { Straight, ExtBottom });

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbSecFigurePileRc {
    #[serde(rename = "Items", default)]
    pub items: Vec<PileRcShape>,
}

impl Inspect for StbSecFigurePileRc {
    fn type_name(&self) -> &'static str {
        "StbSecFigurePile_RC"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::items(&self.items)])
    }
}

/// Cast-in-place RC pile section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecPileRc {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub strength_concrete: String,
    #[serde(rename = "StbSecFigurePile_RC")]
    pub figure: StbSecFigurePileRc,
}

impl Inspect for StbSecPileRc {
    fn type_name(&self) -> &'static str {
        "StbSecPile_RC"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("strength_concrete", &self.strength_concrete),
            Field::object("StbSecFigurePile_RC", &self.figure),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// One segment of a steel pipe pile, numbered from the top
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecPileSStraight {
    pub id_order: u32,
    pub length_pile: f64,
    #[serde(rename = "D")]
    pub diameter: f64,
    pub t: f64,
    pub strength: String,
}

impl Inspect for StbSecPileSStraight {
    fn type_name(&self) -> &'static str {
        "StbSecPile_S_Straight"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id_order", self.id_order),
            Field::attr("length_pile", self.length_pile),
            Field::attr("D", self.diameter),
            Field::attr("t", self.t),
            Field::attr("strength", &self.strength),
        ])
    }
}

/// Steel pile section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecPileS {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    #[serde(rename = "StbSecFigurePile_S", default)]
    pub segments: Vec<StbSecPileSStraight>,
}

impl Inspect for StbSecPileS {
    fn type_name(&self) -> &'static str {
        "StbSecPile_S"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::list("StbSecFigurePile_S", &self.segments),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// One segment of a precast pile, numbered from the top
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecPilePrecastSegment {
    pub id_order: u32,
    pub product_type: String,
    pub product_code: String,
    #[serde(rename = "D")]
    pub diameter: f64,
    pub tc: f64,
    pub length_pile: f64,
}

impl Inspect for StbSecPilePrecastSegment {
    fn type_name(&self) -> &'static str {
        "StbSecPileProduct"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id_order", self.id_order),
            Field::attr("product_type", &self.product_type),
            Field::attr("product_code", &self.product_code),
            Field::attr("D", self.diameter),
            Field::attr("tc", self.tc),
            Field::attr("length_pile", self.length_pile),
        ])
    }
}

/// Precast (PC / PHC) pile section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecPilePrecast {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    #[serde(rename = "StbSecFigurePilePrecast", default)]
    pub segments: Vec<StbSecPilePrecastSegment>,
}

impl Inspect for StbSecPilePrecast {
    fn type_name(&self) -> &'static str {
        "StbSecPilePrecast"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::list("StbSecFigurePilePrecast", &self.segments),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// Rectangular opening section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSecOpenRc {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    #[serde(rename = "length_X")]
    pub length_x: f64,
    #[serde(rename = "length_Y")]
    pub length_y: f64,
}

impl Inspect for StbSecOpenRc {
    fn type_name(&self) -> &'static str {
        "StbSecOpen_RC"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("length_X", self.length_x),
            Field::attr("length_Y", self.length_y),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// All section tables of the model
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbSections {
    #[serde(rename = "StbSecColumn_RC", default)]
    pub column_rc: Vec<StbSecColumnRc>,
    #[serde(rename = "StbSecColumn_S", default)]
    pub column_s: Vec<StbSecColumnS>,
    #[serde(rename = "StbSecColumn_SRC", default)]
    pub column_src: Vec<StbSecColumnSrc>,
    #[serde(rename = "StbSecColumn_CFT", default)]
    pub column_cft: Vec<StbSecColumnCft>,
    #[serde(rename = "StbSecBeam_RC", default)]
    pub beam_rc: Vec<StbSecBeamRc>,
    #[serde(rename = "StbSecBeam_S", default)]
    pub beam_s: Vec<StbSecBeamS>,
    #[serde(rename = "StbSecBeam_SRC", default)]
    pub beam_src: Vec<StbSecBeamSrc>,
    #[serde(rename = "StbSecBrace_S", default)]
    pub brace_s: Vec<StbSecBraceS>,
    #[serde(rename = "StbSecSlab_RC", default)]
    pub slab_rc: Vec<StbSecSlabRc>,
    #[serde(rename = "StbSecSlabDeck", default)]
    pub slab_deck: Vec<StbSecSlabDeck>,
    #[serde(rename = "StbSecSlabPrecast", default)]
    pub slab_precast: Vec<StbSecSlabPrecast>,
    #[serde(rename = "StbSecWall_RC", default)]
    pub wall_rc: Vec<StbSecWallRc>,
    #[serde(rename = "StbSecParapet_RC", default)]
    pub parapet_rc: Vec<StbSecParapetRc>,
    #[serde(rename = "StbSecFoundation_RC", default)]
    pub foundation_rc: Vec<StbSecFoundationRc>,
    #[serde(rename = "StbSecPile_RC", default)]
    pub pile_rc: Vec<StbSecPileRc>,
    #[serde(rename = "StbSecPile_S", default)]
    pub pile_s: Vec<StbSecPileS>,
    #[serde(rename = "StbSecPilePrecast", default)]
    pub pile_precast: Vec<StbSecPilePrecast>,
    #[serde(rename = "StbSecOpen_RC", default)]
    pub open_rc: Vec<StbSecOpenRc>,
    #[serde(rename = "StbSecSteel", default)]
    pub steel: Option<StbSecSteel>,
}

fn by_id<'a, T: Inspect>(items: &'a [T], key: &str) -> Option<&'a dyn Inspect> {
    items
        .iter()
        .find(|item| item.id_value() == Some(key))
        .map(|item| item as &dyn Inspect)
}

impl StbSections {
    /// Section entry of a section table by id; `None` for joint tables
    pub fn find(&self, table: Table, key: &str) -> Option<&dyn Inspect> {
        match table {
            Table::SecColumnRc => by_id(&self.column_rc, key),
            Table::SecColumnS => by_id(&self.column_s, key),
            Table::SecColumnSrc => by_id(&self.column_src, key),
            Table::SecColumnCft => by_id(&self.column_cft, key),
            Table::SecBeamRc => by_id(&self.beam_rc, key),
            Table::SecBeamS => by_id(&self.beam_s, key),
            Table::SecBeamSrc => by_id(&self.beam_src, key),
            Table::SecBraceS => by_id(&self.brace_s, key),
            Table::SecSlabRc => by_id(&self.slab_rc, key),
            Table::SecSlabDeck => by_id(&self.slab_deck, key),
            Table::SecSlabPrecast => by_id(&self.slab_precast, key),
            Table::SecWallRc => by_id(&self.wall_rc, key),
            Table::SecParapetRc => by_id(&self.parapet_rc, key),
            Table::SecFoundationRc => by_id(&self.foundation_rc, key),
            Table::SecPileRc => by_id(&self.pile_rc, key),
            Table::SecPileS => by_id(&self.pile_s, key),
            Table::SecPilePrecast => by_id(&self.pile_precast, key),
            Table::SecOpenRc => by_id(&self.open_rc, key),
            Table::JointColumn | Table::JointBeam => None,
        }
    }

    /// Opening section by id
    pub fn open_section(&self, key: &str) -> Option<&StbSecOpenRc> {
        self.open_rc.iter().find(|open| open.id == key)
    }
}

impl Inspect for StbSections {
    fn type_name(&self) -> &'static str {
        "StbSections"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::list("StbSecColumn_RC", &self.column_rc),
            Field::list("StbSecColumn_S", &self.column_s),
            Field::list("StbSecColumn_SRC", &self.column_src),
            Field::list("StbSecColumn_CFT", &self.column_cft),
            Field::list("StbSecBeam_RC", &self.beam_rc),
            Field::list("StbSecBeam_S", &self.beam_s),
            Field::list("StbSecBeam_SRC", &self.beam_src),
            Field::list("StbSecBrace_S", &self.brace_s),
            Field::list("StbSecSlab_RC", &self.slab_rc),
            Field::list("StbSecSlabDeck", &self.slab_deck),
            Field::list("StbSecSlabPrecast", &self.slab_precast),
            Field::list("StbSecWall_RC", &self.wall_rc),
            Field::list("StbSecParapet_RC", &self.parapet_rc),
            Field::list("StbSecFoundation_RC", &self.foundation_rc),
            Field::list("StbSecPile_RC", &self.pile_rc),
            Field::list("StbSecPile_S", &self.pile_s),
            Field::list("StbSecPilePrecast", &self.pile_precast),
            Field::list("StbSecOpen_RC", &self.open_rc),
            Field::optional_object("StbSecSteel", self.steel.as_ref()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;

    #[test]
    fn test_column_figure_from_json() {
        let section: StbSecColumnS = serde_json::from_str(
            r#"{
                "id":"1","name":"C1",
                "StbSecSteelFigureColumn_S":{"Items":[
                    {"StbSecSteelColumn_S_Same":{"shape":"H-400x400x13x21","strength_main":"SN490B"}}
                ]}
            }"#,
        )
        .unwrap();
        let items = &section.figure.items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].type_name(), "StbSecSteelColumn_S_Same");

        let fields = items[0].fields().unwrap();
        let FieldValue::Attribute(shape) = &fields[1].value else {
            panic!("expected attribute");
        };
        assert_eq!(shape.reference, crate::AttributeRef::SteelShape);
        assert_eq!(shape.value.as_deref(), Some("H-400x400x13x21"));
    }

    #[test]
    fn test_find_by_table() {
        let mut sections = StbSections::default();
        sections.wall_rc.push(StbSecWallRc {
            id: "7".into(),
            guid: None,
            name: "W18".into(),
            strength_concrete: "Fc24".into(),
            figure: StbSecWallRcStraight { t: 180.0 },
        });
        let found = sections.find(Table::SecWallRc, "7").unwrap();
        assert_eq!(found.type_name(), "StbSecWall_RC");
        assert!(sections.find(Table::SecSlabRc, "7").is_none());
        assert!(sections.find(Table::JointColumn, "7").is_none());
    }
}
