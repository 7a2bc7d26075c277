use serde_json::Value;

use crate::{
    aggregate::{self, Bucket, ChartData, ChartPanel, Limit, SummaryStats},
    config::DashboardConfig,
    dataset::Dataset,
    filter::{self, FilterOptions, FilterState},
    map::{self, Marker},
    types::{Attribute, FacetValue, IntersectionRecord},
};

/// Handle returned by [`Dashboard::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Dashboard)>;

/// Single-writer store for the dashboard: owns the dataset, its filter options, the current
/// filter state and the filtered view derived from them.
///
/// Every mutation (`toggle`, `flip`, `clear`) recomputes the view before returning and then
/// notifies subscribers, but only when the state actually changed.
pub struct Dashboard {
    dataset: Dataset,
    options: FilterOptions,
    state: FilterState,
    view: Vec<u32>, // Indices of records passing `state`, ascending
    config: DashboardConfig,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_listener: u64,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("records", &self.dataset.len())
            .field("filtered", &self.view.len())
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Dashboard {
    pub fn new(dataset: Dataset) -> Self {
        Self::with_config(dataset, DashboardConfig::default())
    }

    pub fn with_config(dataset: Dataset, config: DashboardConfig) -> Self {
        let options = filter::derive_options(dataset.records());
        let view = (0..dataset.len() as u32).collect();
        Self {
            dataset,
            options,
            state: FilterState::new(),
            view,
            config,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    #[inline] pub fn dataset(&self) -> &Dataset { &self.dataset }
    #[inline] pub fn options(&self) -> &FilterOptions { &self.options }
    #[inline] pub fn state(&self) -> &FilterState { &self.state }
    #[inline] pub fn config(&self) -> &DashboardConfig { &self.config }

    /// Number of records in the dataset ("of Y").
    #[inline] pub fn total_count(&self) -> usize { self.dataset.len() }

    /// Number of records passing the current filters ("Showing X").
    #[inline] pub fn filtered_count(&self) -> usize { self.view.len() }

    /// Dataset indices of the filtered view, ascending.
    #[inline] pub fn filtered_indices(&self) -> &[u32] { &self.view }

    /// Records of the filtered view, in dataset order.
    pub fn filtered_iter(&self) -> impl Iterator<Item = &IntersectionRecord> + Clone + '_ {
        let records = self.dataset.records();
        self.view.iter().map(move |&i| &records[i as usize])
    }

    pub fn filtered(&self) -> Vec<&IntersectionRecord> { self.filtered_iter().collect() }

    /// Records of the filtered view paired with their dataset indices.
    pub fn filtered_indexed(&self) -> impl Iterator<Item = (u32, &IntersectionRecord)> + Clone + '_ {
        let records = self.dataset.records();
        self.view.iter().map(move |&i| (i, &records[i as usize]))
    }

    /// Select or deselect a value. Returns true if the state changed.
    ///
    /// Selecting a value that does not occur in the dataset's options is ignored, so the
    /// selection for an attribute always stays a subset of its options.
    ///
    /// Panics if the value kind does not fit the attribute.
    pub fn toggle(&mut self, attr: Attribute, value: FacetValue, selected: bool) -> bool {
        assert!(value.fits(attr), "value {value:?} does not fit attribute {attr}");
        if selected && !self.options.contains(attr, &value) {
            tracing::warn!(attribute = %attr, %value, "ignoring selection of a value absent from the dataset");
            return false;
        }
        let changed = self.state.toggle(attr, value, selected);
        if changed { self.refresh(); }
        changed
    }

    /// Select `value` if it is not selected, otherwise deselect it (chart bar clicks).
    pub fn flip(&mut self, attr: Attribute, value: FacetValue) -> bool {
        let selected = self.state.is_selected(attr, &value);
        self.toggle(attr, value, !selected)
    }

    /// Drop every selection. Returns true if anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = self.state.clear();
        if changed { self.refresh(); }
        changed
    }

    /// Register a listener called after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&Dashboard) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != before
    }

    fn refresh(&mut self) {
        self.view = filter::filter_indices(self.dataset.records(), &self.state);
        tracing::debug!(filtered = self.view.len(), total = self.dataset.len(), active = self.state.total_active(), "recomputed filtered view");

        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in listeners.iter_mut() {
            listener(self);
        }
        self.listeners = listeners;
    }

    /// Counts per value of `attr` over the filtered view, in first-seen order.
    pub fn count_by(&self, attr: Attribute) -> Vec<Bucket> {
        aggregate::count_by(self.filtered_iter(), attr)
    }

    /// Largest buckets of `attr` over the filtered view.
    pub fn top_n(&self, attr: Attribute, limit: Limit) -> Vec<Bucket> {
        aggregate::top_n(self.count_by(attr), limit)
    }

    /// Completions per year over the filtered view, using the configured year floor.
    pub fn year_series(&self) -> Vec<Bucket> {
        aggregate::year_series(self.filtered_iter(), self.config.year_floor)
    }

    pub fn stats(&self) -> SummaryStats {
        SummaryStats::compute(self.filtered_iter())
    }

    /// Data for one panel; `expanded` side panels keep every bar.
    pub fn chart(&self, panel: &ChartPanel, expanded: bool) -> ChartData {
        let limit = if expanded { Limit::All } else { Limit::Top(self.config.top_n) };
        panel.data(self.filtered_iter(), &self.state, limit, self.config.year_floor)
    }

    /// Data for every panel of the dashboard, collapsed.
    pub fn charts(&self) -> Vec<ChartData> {
        ChartPanel::dashboard().iter().map(|panel| self.chart(panel, false)).collect()
    }

    /// Map markers for the filtered view. `Marker::index` is the record's dataset index.
    pub fn markers(&self) -> Vec<Marker> {
        map::markers(self.filtered_indexed())
    }

    /// Map markers split into rendering batches of the configured size.
    pub fn marker_batches(&self) -> Vec<Vec<Marker>> {
        let markers = self.markers();
        map::marker_batches(&markers, self.config.marker_chunk_size)
            .map(<[Marker]>::to_vec)
            .collect()
    }

    /// GeoJSON points for the filtered view, optionally clipped to a bounding box.
    pub fn markers_geojson(&self, bounds: Option<[f64; 4]>) -> Value {
        map::markers_geojson(self.dataset.records(), &self.view, bounds)
    }
}
