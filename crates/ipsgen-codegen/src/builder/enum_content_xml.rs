//! Enum content XML resources
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <EnumContent enumType="home.PaymentMode">
//!     <EnumValue>
//!         <EnumAttributeValue attribute="id">monthly</EnumAttributeValue>
//!         <EnumAttributeValue attribute="name" isNull="true"/>
//!     </EnumValue>
//! </EnumContent>
//! ```

use super::{ArtifactBuilder, BuildContext};
use crate::compilation_unit::GeneratedFile;
use crate::error::{GeneratorError, GeneratorResult};
use ipsgen_model::{EnumValueCache, EnumValueTable, IpsObject, IpsProject, ModelError};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;
use std::path::PathBuf;

const CONTENT_TAG: &str = "EnumContent";
const VALUE_TAG: &str = "EnumValue";
const ATTRIBUTE_VALUE_TAG: &str = "EnumAttributeValue";

/// Writes the values of an enum content into an XML resource next to the
/// generated classes
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumContentXmlBuilder;

impl ArtifactBuilder for EnumContentXmlBuilder {
    fn name(&self) -> &'static str {
        "EnumContentXmlBuilder"
    }

    fn is_builder_for(&self, object: &IpsObject) -> bool {
        matches!(object, IpsObject::EnumContent(_))
    }

    /// A changed enum type changes the columns of all its contents.
    fn artifacts_for(&self, object: &IpsObject, project: &IpsProject) -> Vec<String> {
        match object {
            IpsObject::EnumContent(c) => vec![c.qualified_name.clone()],
            IpsObject::EnumType(t) => project
                .enum_contents()
                .filter(|c| c.enum_type == t.qualified_name)
                .map(|c| c.qualified_name.clone())
                .collect(),
            _ => Vec::new(),
        }
    }

    fn build(
        &self,
        qualified_name: &str,
        ctx: &BuildContext<'_>,
    ) -> GeneratorResult<Vec<GeneratedFile>> {
        let project = ctx.project();
        let content = project.enum_content(qualified_name).ok_or_else(|| {
            match project.object(qualified_name) {
                Some(_) => GeneratorError::illegal_argument(format!(
                    "{qualified_name} is not an enum content"
                )),
                None => ModelError::ObjectNotFound(qualified_name.to_string()).into(),
            }
        })?;
        let table = EnumValueCache::global().get_or_resolve(content, project)?;

        let mut path: PathBuf = project
            .java_class_name(qualified_name)
            .split('.')
            .collect();
        path.set_extension("xml");

        Ok(vec![GeneratedFile {
            path,
            content: enum_content_xml(&table)?,
            object: qualified_name.to_string(),
            builder: self.name(),
        }])
    }
}

/// Serialize resolved enum values. Null cells carry `isNull="true"`.
pub fn enum_content_xml(table: &EnumValueTable) -> GeneratorResult<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 4);
    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new(CONTENT_TAG);
    root.push_attribute(("enumType", table.enum_type.as_str()));
    write(&mut writer, Event::Start(root))?;

    for row in &table.rows {
        write(&mut writer, Event::Start(BytesStart::new(VALUE_TAG)))?;
        for (column, cell) in table.columns.iter().zip(row.iter()) {
            let mut element = BytesStart::new(ATTRIBUTE_VALUE_TAG);
            element.push_attribute(("attribute", column.as_str()));
            match cell {
                Some(value) => {
                    write(&mut writer, Event::Start(element))?;
                    write(&mut writer, Event::Text(BytesText::new(value)))?;
                    write(&mut writer, Event::End(BytesEnd::new(ATTRIBUTE_VALUE_TAG)))?;
                }
                None => {
                    element.push_attribute(("isNull", "true"));
                    write(&mut writer, Event::Empty(element))?;
                }
            }
        }
        write(&mut writer, Event::End(BytesEnd::new(VALUE_TAG)))?;
    }

    write(&mut writer, Event::End(BytesEnd::new(CONTENT_TAG)))?;
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|err| GeneratorError::Xml(err.to_string()))
}

fn write(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> GeneratorResult<()> {
    writer
        .write_event(event)
        .map_err(|err| GeneratorError::Xml(err.to_string()))
}
