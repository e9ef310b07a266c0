//! Inspector selection: which sample, if any, the user has tapped.

use serde::{Deserialize, Serialize};

use crate::format::{format_percent, format_watts};
use crate::rows::ChartRow;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    /// A tap inside the plot, already run through the resolver.
    Tap(Option<usize>),
    /// A tap on the dismiss overlay.
    Dismiss,
    /// New samples or a new granularity.
    DataChanged,
}

impl SelectionState {
    pub fn apply(self, event: SelectionEvent) -> Self {
        match event {
            SelectionEvent::Tap(Some(index)) => SelectionState::Selected(index),
            SelectionEvent::Tap(None) | SelectionEvent::Dismiss | SelectionEvent::DataChanged => {
                SelectionState::Unselected
            }
        }
    }

    pub fn index(self) -> Option<usize> {
        match self {
            SelectionState::Selected(i) => Some(i),
            SelectionState::Unselected => None,
        }
    }
}

/// Values of the selected row for the inspector overlay.
///
/// `battery` and `soc_pct` are only present when their series is shown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectedSample {
    pub index: usize,
    pub label: String,
    pub pv: f64,
    pub load: f64,
    pub feed_in: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soc_pct: Option<f64>,
    pub formatted: SelectedText,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectedText {
    pub pv: String,
    pub load: String,
    pub feed_in: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soc: Option<String>,
}

impl SelectedSample {
    pub fn from_row(row: &ChartRow, show_battery: bool, show_soc: bool) -> Self {
        let battery = show_battery.then_some(row.battery);
        let soc_pct = show_soc.then_some(row.soc_pct);
        Self {
            index: row.index,
            label: row.tooltip_label.clone(),
            pv: row.pv,
            load: row.load,
            feed_in: row.feed_in,
            battery,
            soc_pct,
            formatted: SelectedText {
                pv: format_watts(row.pv),
                load: format_watts(row.load),
                feed_in: format_watts(row.feed_in),
                battery: battery.map(format_watts),
                soc: soc_pct.map(format_percent),
            },
        }
    }
}
