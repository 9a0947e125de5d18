/// Talend schema metadata XML rendering.
pub mod talend_xml;
