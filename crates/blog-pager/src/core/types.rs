use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LENGTH: u32 = 5;
pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_LIMIT_OPTIONS: [u32; 5] = [5, 10, 20, 50, 100];

/// Process-wide pager defaults, filled from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerConfig {
    pub page_length: u32,
    pub default_limit: u32,
    pub limit_options: Vec<u32>,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_length: DEFAULT_PAGE_LENGTH,
            default_limit: DEFAULT_LIMIT,
            limit_options: DEFAULT_LIMIT_OPTIONS.to_vec(),
        }
    }
}

/// Everything the pager needs for one render. Supplied fresh by the caller
/// each time and never mutated by the pager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingDescriptor {
    pub current_page: u32,
    pub page_count: u32,
    pub page_length: u32,
    pub current_limit: u32,
    pub limit_options: Vec<u32>,
}

impl Default for PagingDescriptor {
    fn default() -> Self {
        DescriptorInput::default().resolve(&PagerConfig::default())
    }
}

/// Wire form of a descriptor: any field may be omitted and is then taken
/// from the configured defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorInput {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub page_length: Option<u32>,
    #[serde(default)]
    pub current_limit: Option<u32>,
    #[serde(default)]
    pub limit_options: Option<Vec<u32>>,
}

impl DescriptorInput {
    pub fn resolve(self, cfg: &PagerConfig) -> PagingDescriptor {
        PagingDescriptor {
            current_page: self.current_page.unwrap_or(1),
            page_count: self.page_count.unwrap_or(1),
            page_length: self.page_length.unwrap_or(cfg.page_length),
            current_limit: self.current_limit.unwrap_or(cfg.default_limit),
            limit_options: self
                .limit_options
                .unwrap_or_else(|| cfg.limit_options.clone()),
        }
    }
}

/// Contiguous run of page numbers shown at once, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub page_start: u32,
    pub page_end: u32,
}

impl PageWindow {
    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.page_start..=self.page_end
    }

    pub fn contains(&self, page: u32) -> bool {
        (self.page_start..=self.page_end).contains(&page)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum Control {
    First,
    EllipsisBack,
    Previous,
    Page(u32),
    Next,
    EllipsisForward,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub control: Control,
    pub target: u32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitSelector {
    pub options: Vec<u32>,
    pub current: u32,
}

/// Render description of the pager. `links` is empty when the pagination
/// control is hidden; the limit selector is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagerView {
    pub visible: bool,
    #[serde(default)]
    pub window: Option<PageWindow>,
    pub links: Vec<PageLink>,
    pub limit_selector: LimitSelector,
}

/// A change the pager asks its caller to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Intent {
    PageChange(u32),
    LimitChange(u32),
}
