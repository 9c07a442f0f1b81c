pub(crate) mod control_panel;
pub(crate) mod grid;
pub(crate) mod plan;
pub(crate) mod tiers;
