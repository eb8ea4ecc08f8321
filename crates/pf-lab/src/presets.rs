//! Built-in banner presets
//!
//! A banner pairs a guaranteed single draw with a ten-draw selection. Both
//! draw from the same 14 featured prizes; the guaranteed table gives the
//! featured category the whole unit interval, the variable one only 7/60.
//! Detailed banners add two single-prize off-banner categories that take
//! a small slice of the interval.

use serde::{Deserialize, Serialize};

use pf_core::{PfError, PfResult, PrizeCategorySpec, SelectionDomain};

use crate::table::build_selection_table;

/// Featured prizes on every banner
pub const FEATURED_PRIZE_COUNT: u32 = 14;

/// Featured category name
pub const FEATURED_CATEGORY: &str = "5/6*";

/// Off-banner category names (one prize each)
pub const OFF_BANNER_CATEGORIES: [&str; 2] = ["OffBan 6*", "OffBan 5*"];

/// Draws in the guaranteed domain
pub const GUARANTEED_DRAWS: u32 = 1;

/// Draws in the variable domain
pub const VARIABLE_DRAWS: u32 = 10;

/// Featured share on a variable-rate table
pub const VARIABLE_SHARE: f64 = 7.0 / 60.0;

/// Share of one off-banner category on a detailed table
pub const OFF_BANNER_SHARE: f64 = 0.02 / 14.04;

/// Featured share on a detailed guaranteed table
pub const DETAILED_GUARANTEED_SHARE: f64 = 14.0 / 14.04;

/// Ids accepted by [`preset`]
pub const PRESET_IDS: [&str; 3] = ["simple_banner", "detailed_banner", "named_banner"];

/// Featured prize names used by the `named_banner` preset
pub const SAMPLE_PRIZE_NAMES: [&str; 14] = [
    "Excalibur",
    "Masamune",
    "Murasame",
    "Ragnarok",
    "Apocalypse",
    "Ultima Weapon",
    "Save the Queen",
    "Crystal Shield",
    "Genji Armor",
    "Ribbon",
    "Mythril Rod",
    "Rune Blade",
    "Gungnir",
    "Kiku-ichimonji",
];

/// Rate of the featured category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerRate {
    /// Every draw lands on a featured prize
    Guaranteed,
    /// Featured prizes share 7/60 of the interval
    Variable,
}

/// Which categories a banner table carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerDetail {
    /// Featured category only
    Simple,
    /// Featured category plus the off-banner categories
    Detailed,
}

/// Named, ready-to-run set of selection domains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerPreset {
    pub id: String,
    pub name: String,
    pub description: String,
    pub selection_domains: Vec<SelectionDomain>,
}

/// Category specs for one banner table.
///
/// `names` replaces the generated featured names and must hold
/// [`FEATURED_PRIZE_COUNT`] entries.
pub fn banner_specs(
    rate: BannerRate,
    detail: BannerDetail,
    names: Option<&[String]>,
) -> Vec<PrizeCategorySpec> {
    let featured_share = match (rate, detail) {
        (BannerRate::Guaranteed, BannerDetail::Simple) => 1.0,
        (BannerRate::Guaranteed, BannerDetail::Detailed) => DETAILED_GUARANTEED_SHARE,
        (BannerRate::Variable, _) => VARIABLE_SHARE,
    };

    let featured = match names {
        Some(names) => PrizeCategorySpec {
            category_name: FEATURED_CATEGORY.to_string(),
            probability_share: featured_share,
            prize_count: FEATURED_PRIZE_COUNT,
            prize_names: names.to_vec(),
        },
        None => PrizeCategorySpec::with_count(FEATURED_CATEGORY, featured_share, FEATURED_PRIZE_COUNT),
    };

    let mut specs = vec![featured];
    if detail == BannerDetail::Detailed {
        specs.extend(OFF_BANNER_CATEGORIES.iter().map(|&category| {
            PrizeCategorySpec::with_names(category, OFF_BANNER_SHARE, vec![category.to_string()])
        }));
    }
    specs
}

/// Guaranteed plus variable domains for a banner
pub fn banner_domains(detail: BannerDetail, names: Option<&[String]>) -> PfResult<Vec<SelectionDomain>> {
    let guaranteed = build_selection_table(&banner_specs(BannerRate::Guaranteed, detail, names))?;
    let variable = build_selection_table(&banner_specs(BannerRate::Variable, detail, names))?;

    Ok(vec![
        SelectionDomain::new("Guaranteed", GUARANTEED_DRAWS, guaranteed),
        SelectionDomain::new("Variable", VARIABLE_DRAWS, variable),
    ])
}

/// Get all built-in presets
pub fn all_presets() -> PfResult<Vec<BannerPreset>> {
    PRESET_IDS.iter().map(|id| preset(id)).collect()
}

/// Look up a built-in preset by id
pub fn preset(id: &str) -> PfResult<BannerPreset> {
    match id {
        "simple_banner" => Ok(BannerPreset {
            id: id.to_string(),
            name: "Simple Banner".to_string(),
            description: "14 featured prizes with generated names".to_string(),
            selection_domains: banner_domains(BannerDetail::Simple, None)?,
        }),
        "detailed_banner" => Ok(BannerPreset {
            id: id.to_string(),
            name: "Detailed Banner".to_string(),
            description: "14 featured prizes plus two off-banner prizes".to_string(),
            selection_domains: banner_domains(BannerDetail::Detailed, None)?,
        }),
        "named_banner" => {
            let names: Vec<String> = SAMPLE_PRIZE_NAMES.iter().map(|name| name.to_string()).collect();
            Ok(BannerPreset {
                id: id.to_string(),
                name: "Named Banner".to_string(),
                description: "14 named featured prizes plus two off-banner prizes".to_string(),
                selection_domains: banner_domains(BannerDetail::Detailed, Some(&names))?,
            })
        }
        _ => Err(PfError::UnknownPreset(id.to_string())),
    }
}
