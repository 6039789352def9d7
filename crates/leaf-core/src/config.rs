/// Highest z-index a browser accepts; the default bound for levels, slot
/// indices and computed depths.
pub const DEFAULT_MAX_LEVEL: u32 = i32::MAX as u32;

/// Names and bounds used by a [`Leaf`](crate::Leaf) context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafConfig {
    /// Group used when an operation is not given one.
    pub root_group: String,
    /// Inclusive upper bound for level, index and depth values.
    pub max_level: u32,
    /// Tag of the element created for each page.
    pub page_tag: String,
    /// Tag of the container element that hosts a group's pages.
    pub view_tag: String,
    pub page_class: String,
    pub hidden_class: String,
    /// Class and `name` attribute of the global `<style>` element.
    pub style_name: String,
}

impl Default for LeafConfig {
    fn default() -> Self {
        Self {
            root_group: "root".into(),
            max_level: DEFAULT_MAX_LEVEL,
            page_tag: "div".into(),
            view_tag: "section".into(),
            page_class: "page".into(),
            hidden_class: "hidden".into(),
            style_name: "root".into(),
        }
    }
}

impl LeafConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root_group(mut self, group: impl Into<String>) -> Self {
        self.root_group = group.into();
        self
    }

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_page_tag(mut self, tag: impl Into<String>) -> Self {
        self.page_tag = tag.into();
        self
    }

    pub fn with_view_tag(mut self, tag: impl Into<String>) -> Self {
        self.view_tag = tag.into();
        self
    }

    pub fn with_hidden_class(mut self, class: impl Into<String>) -> Self {
        self.hidden_class = class.into();
        self
    }
}
