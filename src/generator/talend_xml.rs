use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::error::Error;
use crate::mapping::type_map::TypeMap;
use crate::parser::column_extractor::ColumnRecord;

/// `dbmsId` written on the `<schema>` element when none is given.
pub const DEFAULT_DBMS_ID: &str = "teradata";

/// Render columns as a Talend schema metadata document.
///
/// Every column becomes one empty `<column>` element; its `talendType` comes
/// from `type_map`, so a column whose type is not mapped fails the render.
pub fn render_schema(
    columns: &[ColumnRecord],
    type_map: &TypeMap,
    dbms_id: &str,
) -> Result<String, Error> {
    let mut writer = Writer::new(Vec::new());

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let mut schema = BytesStart::new("schema");
    schema.push_attribute(("dbmsId", dbms_id));
    emit(&mut writer, Event::Start(schema))?;

    for column in columns {
        emit(&mut writer, Event::Empty(column_element(column, type_map)?))?;
    }

    emit(&mut writer, Event::End(BytesEnd::new("schema")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| Error::Xml(e.to_string()))
}

fn column_element(
    column: &ColumnRecord,
    type_map: &TypeMap,
) -> Result<BytesStart<'static>, Error> {
    let talend_type = type_map
        .lookup(&column.raw_type)
        .map_err(|_| Error::UnmappedType {
            column: column.name.clone(),
            raw_type: column.raw_type.clone(),
        })?;
    let nullable = if column.nullable() { "true" } else { "false" };
    let raw_type = column.raw_type.to_ascii_uppercase();

    let mut element = BytesStart::new("column");
    element.push_attribute(("comment", ""));
    element.push_attribute(("default", column.default_value().unwrap_or_default()));
    element.push_attribute(("key", "false"));
    element.push_attribute(("label", column.name.as_str()));
    element.push_attribute(("length", column.size.as_deref().unwrap_or_default()));
    element.push_attribute(("nullable", nullable));
    element.push_attribute(("originalDbColumnName", column.name.as_str()));
    element.push_attribute(("pattern", ""));
    element.push_attribute(("precision", column.precision.as_deref().unwrap_or_default()));
    element.push_attribute(("talendType", talend_type));
    element.push_attribute(("type", raw_type.as_str()));
    Ok(element)
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), Error> {
    writer
        .write_event(event)
        .map_err(|e| Error::Xml(e.to_string()))
}
