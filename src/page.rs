use std::fmt;

use crate::error::RouteError;

/// Enum representing the four statically known pages of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    About,
    Services,
    Contact,
}

impl Page {
    /// Every routable page, in navigation order.
    pub const ALL: [Page; 4] = [Page::Home, Page::About, Page::Services, Page::Contact];

    /// The name used in the location hash and in `data-page` markers.
    pub fn name(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Services => "services",
            Page::Contact => "contact",
        }
    }

    /// Route table: where the page's fragment is fetched from. Immutable
    /// for the process lifetime.
    pub fn fragment_path(self) -> &'static str {
        match self {
            Page::Home => "fragments/hero.html",
            Page::About => "fragments/about.html",
            Page::Services => "fragments/services.html",
            Page::Contact => "fragments/contact.html",
        }
    }

    /// Title table: the document title shown while the page is current.
    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Coral Estrada Portfolio",
            Page::About => "About - Coral Estrada Portfolio",
            Page::Services => "Services - Coral Estrada Portfolio",
            Page::Contact => "Contact - Coral Estrada Portfolio",
        }
    }

    /// Parse a page name as it appears in the hash or a `data-page` marker.
    pub fn from_name(name: &str) -> Result<Page, RouteError> {
        match name {
            "home" => Ok(Page::Home),
            "about" => Ok(Page::About),
            "services" => Ok(Page::Services),
            "contact" => Ok(Page::Contact),
            other => Err(RouteError::UnknownPage(other.to_string())),
        }
    }

    /// Resolve a raw location fragment (leading `#` already stripped) to a
    /// page. An empty or unset fragment resolves to the home page.
    pub fn from_hash(hash: Option<&str>) -> Result<Page, RouteError> {
        match hash {
            None | Some("") => Ok(Page::Home),
            Some(name) => Page::from_name(name),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
