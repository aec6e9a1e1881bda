//! Static menu catalog: tool categories and the items listed under them.
//!
//! The catalog is read-only after construction. Lookups signal a miss with
//! `None` (or an empty `Vec`), never with an error. The built-in catalog is
//! available through [`Catalog::builtin`].

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::names::*;
use crate::routes::RouteTable;

/// A group of menu items shown under one sidebar heading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl MenuCategory {
    pub fn new(id: impl Into<String>, label: impl Into<String>, icon: Option<&str>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: icon.map(str::to_string),
        }
    }
}

/// A single navigable tool entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    /// Id of the owning [`MenuCategory`].
    pub category: String,
    pub icon: String,
    /// Route Table path this item navigates to.
    pub route: String,
    /// Extra search terms, in display order.
    pub aliases: Vec<String>,
    pub description: String,
}

impl MenuItem {
    /// Create a menu item from string slices.
    ///
    /// Avoids the repetitive `.into()` calls on each alias when building the
    /// catalog from literals.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        category: impl Into<String>,
        icon: impl Into<String>,
        route: impl Into<String>,
        aliases: &[&str],
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category: category.into(),
            icon: icon.into(),
            route: route.into(),
            aliases: aliases.iter().map(|s| (*s).to_string()).collect(),
            description: description.into(),
        }
    }
}

/// A category together with its items, in catalog order.
#[derive(Clone, Debug, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: &'a MenuCategory,
    pub items: Vec<&'a MenuItem>,
}

/// The full menu: categories and items in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    categories: Vec<MenuCategory>,
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn new(categories: Vec<MenuCategory>, items: Vec<MenuItem>) -> Self {
        Self { categories, items }
    }

    /// The catalog shipped with the toolbox, built once per process.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(builtin_catalog)
    }

    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get_category(&self, id: &str) -> Option<&MenuCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up a menu item by id.
    pub fn get_menu_item_by_id(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// All items whose `category` equals `category_id`, in insertion order.
    pub fn get_menu_items_by_category(&self, category_id: &str) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| item.category == category_id)
            .collect()
    }

    /// Categories paired with their items, as the sidebar renders them in
    /// list mode. Categories with no items are kept.
    pub fn grouped(&self) -> Vec<CategoryGroup<'_>> {
        self.categories
            .iter()
            .map(|category| CategoryGroup {
                category,
                items: self.get_menu_items_by_category(&category.id),
            })
            .collect()
    }

    /// Check the cross references the catalog relies on.
    ///
    /// Returns one message per problem: duplicate ids, items pointing at an
    /// unknown category, and items whose route is missing from `routes`.
    pub fn validate(&self, routes: &RouteTable) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        for (i, category) in self.categories.iter().enumerate() {
            if self.categories[..i].iter().any(|c| c.id == category.id) {
                problems.push(format!("duplicate category id '{}'", category.id));
            }
        }

        for (i, item) in self.items.iter().enumerate() {
            if self.items[..i].iter().any(|other| other.id == item.id) {
                problems.push(format!("duplicate menu item id '{}'", item.id));
            }
            if self.get_category(&item.category).is_none() {
                problems.push(format!(
                    "menu item '{}' references unknown category '{}'",
                    item.id, item.category
                ));
            }
            if routes.get(&item.route).is_none() {
                problems.push(format!(
                    "menu item '{}' references unknown route '{}'",
                    item.id, item.route
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

fn builtin_catalog() -> Catalog {
    let categories = vec![
        MenuCategory::new(TEXT_TOOLS, "文本工具", Some("bi-file-text")),
        MenuCategory::new(CONVERTERS, "轉換器", Some("bi-arrow-left-right")),
        MenuCategory::new(GENERATORS, "生成器", Some("bi-sparkles")),
        MenuCategory::new(VIEWERS, "檢視工具", Some("bi-eye")),
    ];

    let items = vec![
        MenuItem::new(
            JSON_TOOL,
            "JSON 工具",
            TEXT_TOOLS,
            "bi-braces",
            JSON_TOOL_PATH,
            &["json", "parse", "格式化", "format", "validate", "schema"],
            "快速解析、格式化、驗證 JSON 資料",
        ),
        MenuItem::new(
            MARKDOWN_TOOL,
            "Markdown 編輯",
            TEXT_TOOLS,
            "bi-markdown",
            MARKDOWN_TOOL_PATH,
            &["md", "markdown", "編輯", "preview", "預覽"],
            "編輯並即時預覽 Markdown 文件",
        ),
        MenuItem::new(
            TOON_CONVERTER,
            "TOON 轉換",
            CONVERTERS,
            "bi-arrow-left-right",
            TOON_CONVERTER_PATH,
            &["toon", "轉換", "convert"],
            "TOON 格式轉換工具",
        ),
        MenuItem::new(
            PASSWORD_GENERATOR,
            "密碼產生器",
            GENERATORS,
            "bi-shield-lock",
            PASSWORD_GENERATOR_PATH,
            &["pwd", "password", "密碼", "產生", "generate"],
            "生成強而有力的隨機密碼",
        ),
        MenuItem::new(
            DIFF_VIEWER,
            "Diff 檢視",
            VIEWERS,
            "bi-file-diff",
            DIFF_VIEWER_PATH,
            &["diff", "對比", "compare", "比較"],
            "比較兩個文本的差異",
        ),
        MenuItem::new(
            DOCUMENT_VIEWER,
            "文檔檢視",
            VIEWERS,
            "bi-file-text",
            DOCUMENT_VIEWER_PATH,
            &["doc", "document", "viewer", "文檔"],
            "查看和預覽各種文檔格式",
        ),
    ];

    Catalog::new(categories, items)
}
