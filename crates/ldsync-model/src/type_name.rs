//! Recognized structured-data type vocabulary.
//!
//! The set is closed. Names outside it are carried through untouched on
//! nodes but never dispatched to a rule table.

/// A recognized structured-data category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum TypeName {
    Organization,
    Person,
    Place,
    LocalBusiness,
    WebSite,
    WebPage,
    Article,
    BlogPosting,
    Product,
    VideoObject,
    ImageObject,
    Event,
    Review,
    #[serde(rename = "FAQPage")]
    FaqPage,
    HowTo,
    BreadcrumbList,
}

impl TypeName {
    pub const ALL: [TypeName; 16] = [
        Self::Organization,
        Self::Person,
        Self::Place,
        Self::LocalBusiness,
        Self::WebSite,
        Self::WebPage,
        Self::Article,
        Self::BlogPosting,
        Self::Product,
        Self::VideoObject,
        Self::ImageObject,
        Self::Event,
        Self::Review,
        Self::FaqPage,
        Self::HowTo,
        Self::BreadcrumbList,
    ];

    /// Parse an exact `@type` value. Unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == raw)
    }

    /// The vocabulary spelling used in `@type`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::Person => "Person",
            Self::Place => "Place",
            Self::LocalBusiness => "LocalBusiness",
            Self::WebSite => "WebSite",
            Self::WebPage => "WebPage",
            Self::Article => "Article",
            Self::BlogPosting => "BlogPosting",
            Self::Product => "Product",
            Self::VideoObject => "VideoObject",
            Self::ImageObject => "ImageObject",
            Self::Event => "Event",
            Self::Review => "Review",
            Self::FaqPage => "FAQPage",
            Self::HowTo => "HowTo",
            Self::BreadcrumbList => "BreadcrumbList",
        }
    }

    /// Lowercase segment used inside rule ids (`google.faqpage.main_entity`).
    pub fn slug(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Person => "person",
            Self::Place => "place",
            Self::LocalBusiness => "localbusiness",
            Self::WebSite => "website",
            Self::WebPage => "webpage",
            Self::Article => "article",
            Self::BlogPosting => "blogposting",
            Self::Product => "product",
            Self::VideoObject => "videoobject",
            Self::ImageObject => "imageobject",
            Self::Event => "event",
            Self::Review => "review",
            Self::FaqPage => "faqpage",
            Self::HowTo => "howto",
            Self::BreadcrumbList => "breadcrumblist",
        }
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TypeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.trim()).ok_or_else(|| format!("unknown structured-data type: {s}"))
    }
}
