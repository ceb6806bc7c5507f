//! Device flavors
//!
//! A flavor names a family of devices sharing a register set. Flavors form
//! a dependency graph (see [`FlavorGraph`]): enabling `MPPT_BS` enables
//! `MPPT`, which enables `CHG`, which enables `ANY`.

mod graph;

pub use graph::{FlavorError, FlavorGraph};

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Device family tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Flavor {
    /// Shortcut enabling every concrete flavor
    All,
    /// Phoenix inverters
    InvPhnx,
    /// Phoenix chargers
    ChgPhnx,
    /// BlueSolar MPPT
    MpptBs,
    /// MPPT RS
    MpptRs,
    Bmv60,
    Bmv70,
    Bmv71,
    /// Multi RS
    MultiRs,
    /// Any MPPT charger
    Mppt,
    /// Any battery monitor
    Bmv,
    /// Any charger
    Chg,
    /// Any inverter
    Inv,
    /// Registers common to all devices
    Any,
}

impl Flavor {
    /// Number of flavors
    pub const COUNT: usize = 14;

    /// Every flavor, in declaration order
    pub const ALL: [Flavor; Flavor::COUNT] = [
        Flavor::All,
        Flavor::InvPhnx,
        Flavor::ChgPhnx,
        Flavor::MpptBs,
        Flavor::MpptRs,
        Flavor::Bmv60,
        Flavor::Bmv70,
        Flavor::Bmv71,
        Flavor::MultiRs,
        Flavor::Mppt,
        Flavor::Bmv,
        Flavor::Chg,
        Flavor::Inv,
        Flavor::Any,
    ];

    /// Protocol name, as used in configuration files
    pub const fn name(self) -> &'static str {
        match self {
            Flavor::All => "ALL",
            Flavor::InvPhnx => "INV_PHNX",
            Flavor::ChgPhnx => "CHG_PHNX",
            Flavor::MpptBs => "MPPT_BS",
            Flavor::MpptRs => "MPPT_RS",
            Flavor::Bmv60 => "BMV60",
            Flavor::Bmv70 => "BMV70",
            Flavor::Bmv71 => "BMV71",
            Flavor::MultiRs => "MULTI_RS",
            Flavor::Mppt => "MPPT",
            Flavor::Bmv => "BMV",
            Flavor::Chg => "CHG",
            Flavor::Inv => "INV",
            Flavor::Any => "ANY",
        }
    }

    const fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Flavor {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flavor::ALL
            .iter()
            .copied()
            .find(|flavor| flavor.name() == s)
            .ok_or(())
    }
}

/// Set of flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlavorSet(u32);

impl FlavorSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn single(flavor: Flavor) -> Self {
        Self(flavor.bit())
    }

    /// Builder-style insertion, usable in constants
    pub const fn with(self, flavor: Flavor) -> Self {
        Self(self.0 | flavor.bit())
    }

    pub fn insert(&mut self, flavor: Flavor) -> bool {
        let added = !self.contains(flavor);
        self.0 |= flavor.bit();
        added
    }

    pub fn remove(&mut self, flavor: Flavor) {
        self.0 &= !flavor.bit();
    }

    pub const fn contains(&self, flavor: Flavor) -> bool {
        self.0 & flavor.bit() != 0
    }

    pub const fn union(self, other: FlavorSet) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_superset(&self, other: &FlavorSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Flavor> {
        let set = *self;
        Flavor::ALL
            .into_iter()
            .filter(move |flavor| set.contains(*flavor))
    }
}

impl FromIterator<Flavor> for FlavorSet {
    fn from_iter<I: IntoIterator<Item = Flavor>>(iter: I) -> Self {
        let mut set = FlavorSet::empty();
        for flavor in iter {
            set.insert(flavor);
        }
        set
    }
}

impl fmt::Display for FlavorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, flavor) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(flavor.name())?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flavor_names_round_trip() {
        for flavor in Flavor::ALL {
            assert_eq!(flavor.name().parse::<Flavor>(), Ok(flavor));
        }
        assert!("MPPT_XX".parse::<Flavor>().is_err());
    }

    #[test]
    fn test_flavor_set_operations() {
        let mut set = FlavorSet::single(Flavor::Bmv);
        assert!(set.insert(Flavor::Any));
        assert!(!set.insert(Flavor::Any));
        assert!(set.contains(Flavor::Bmv));
        assert!(!set.contains(Flavor::Mppt));
        assert_eq!(set.len(), 2);
        assert!(set.is_superset(&FlavorSet::single(Flavor::Any)));

        set.remove(Flavor::Bmv);
        assert_eq!(set, FlavorSet::single(Flavor::Any));
        assert_eq!(std::format!("{}", set.with(Flavor::Inv)), "{INV,ANY}");
    }
}
