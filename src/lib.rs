pub mod aggregate;
pub mod chart;
pub mod date_util;
pub mod error;
pub mod filter;
pub mod interact;
pub mod links;
pub mod load;
pub mod records;
pub mod render;

pub use aggregate::{AuthorTotal, FunnelStage, Metric, StageName};
pub use chart::scatter::ScatterConfig;
pub use chart::{ChartModel, Viewport};
pub use error::{Error, Result};
pub use filter::{derive_available_months, CommitFilter, IssueFilter, MonthFilter, MonthOption};
pub use load::{load_datasets, Datasets};
pub use records::{CommitRecord, DropReport, IssueRecord, IssueState, PrRecord};

use chrono::{DateTime, Utc};

use render::ChartSection;

/// The current filter selections, reconstructed from the caller's inputs on
/// every apply. Purely transient; never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub developer: Option<String>,
    pub task: Option<String>,
    pub start_after: Option<DateTime<Utc>>,
    pub start_before: Option<DateTime<Utc>>,
    pub scatter_month: MonthFilter,
    pub bar_month: MonthFilter,
    pub metric: Metric,
    /// Seed for the scatter jitter; `None` draws fresh jitter per render.
    pub seed: Option<u64>,
}

impl FilterOptions {
    fn issue_filter(&self) -> IssueFilter {
        let mut filter = IssueFilter::new();
        if let Some(ref dev) = self.developer {
            filter = filter.developer(dev);
        }
        if let Some(ref task) = self.task {
            filter = filter.task(task);
        }
        if let Some(bound) = self.start_after {
            filter = filter.start_after(bound);
        }
        if let Some(bound) = self.start_before {
            filter = filter.start_before(bound);
        }
        filter
    }
}

/// Main entry point: owns the immutable record sets and derives each view
/// from scratch on demand. A filter change re-renders only the view it
/// feeds; the others are untouched.
pub struct Dashboard {
    datasets: Datasets,
    options: FilterOptions,
    viewport: Viewport,
}

impl Dashboard {
    pub fn new(datasets: Datasets, options: FilterOptions) -> Self {
        Self {
            datasets,
            options,
            viewport: Viewport::default(),
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Access the normalized record sets (for direct queries in the CLI).
    pub fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    /// The Gantt-style issue timeline under the current filters. An empty
    /// dataset and an empty filter result produce distinct messages.
    pub fn gantt_view(&self) -> ChartModel {
        if self.datasets.issues.is_empty() {
            return ChartModel::empty("No issues were loaded from the issue dataset.");
        }
        let filtered = self.options.issue_filter().apply(&self.datasets.issues);
        chart::gantt::render(&filtered, &self.viewport)
    }

    /// The commit scatter plot (weekday by hour) under the month filter.
    pub fn scatter_view(&self) -> ChartModel {
        if self.datasets.commits.is_empty() {
            return ChartModel::empty("No commits were loaded from the commit dataset.");
        }
        let filtered = CommitFilter::new()
            .month(self.options.scatter_month)
            .apply(&self.datasets.commits);
        let config = ScatterConfig { seed: self.options.seed };
        chart::scatter::render(&filtered, &self.viewport, &config)
    }

    /// The per-author bar chart for the selected metric and month filter.
    pub fn bar_view(&self) -> ChartModel {
        if self.datasets.commits.is_empty() {
            return ChartModel::empty("No commits were loaded from the commit dataset.");
        }
        let filtered = CommitFilter::new()
            .month(self.options.bar_month)
            .apply(&self.datasets.commits);
        let totals = aggregate::by_author(&filtered, self.options.metric);
        chart::bar::render(&totals, &self.viewport, self.options.metric)
    }

    /// The pull-request funnel. PRs take no filters; emptiness blanks only
    /// this view.
    pub fn funnel_view(&self) -> ChartModel {
        if self.datasets.prs.is_empty() {
            return ChartModel::empty("No pull requests were loaded from the PR dataset.");
        }
        let stages = aggregate::funnel(&self.datasets.prs);
        chart::funnel::render(&stages)
    }

    /// Months present in the commit dataset, for filter population.
    pub fn available_months(&self) -> Vec<MonthOption> {
        derive_available_months(&self.datasets.commits)
    }

    /// Render all four views into one standalone HTML page.
    pub fn render_page(&self, title: &str) -> String {
        let sections = [
            ChartSection::new("Issue Timeline", render::paint(&self.gantt_view())),
            ChartSection::new("Commit Activity", render::paint(&self.scatter_view())),
            ChartSection::new("Author Totals", render::paint(&self.bar_view())),
            ChartSection::new("Pull Request Funnel", render::paint(&self.funnel_view())),
        ];
        render::render_page(title, &sections)
    }
}
