use crate::cell::Cell;
use core::fmt;

/// A named point of interest, e.g. a home, a café or an apartment block.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Waypoint {
    pub cell: Cell,
    pub label: String,
}

impl Waypoint {
    pub fn new(cell: Cell, label: impl Into<String>) -> Waypoint {
        Waypoint {
            cell,
            label: label.into(),
        }
    }

    /// Checks whether the label contains `label`, ignoring surrounding whitespace, so that
    /// `"BandalgomCoffee"` also finds `"BandalgomCoffee Gangnam"`.
    pub fn has_label(&self, label: &str) -> bool {
        self.label.contains(label.trim())
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.label.trim(), self.cell)
    }
}

/// The first waypoint carrying `label`, typically used to locate the home cell.
pub fn first_labeled<'a>(waypoints: &'a [Waypoint], label: &str) -> Option<&'a Waypoint> {
    waypoints.iter().find(|w| w.has_label(label))
}

/// All waypoints carrying `label`, in input order.
pub fn all_labeled<'a>(
    waypoints: &'a [Waypoint],
    label: &'a str,
) -> impl Iterator<Item = &'a Waypoint> + 'a {
    waypoints.iter().filter(move |w| w.has_label(label))
}
