use aliri_braid::braid;

/// Power BI account username, usually an email address.
#[braid(serde)]
pub struct Username;

/// Opaque embed token for rendering a report.
#[braid(serde)]
pub struct EmbedToken;

/// Resource identifier which bearer tokens are requested for.
#[braid(serde)]
pub struct Resource;
