//! XML adapter annotations on policy fields

use super::{AnnotationGenerator, wrong_node};
use crate::error::GeneratorResult;
use crate::fragment::{JavaCodeFragment, JavaCodeFragmentBuilder};
use crate::node::ModelNode;
use crate::runtime;
use indexmap::IndexMap;

const DEFAULT_ADAPTERS: &[(&str, &str)] = &[
    (
        "org.faktorips.values.Money",
        "org.faktorips.runtime.jaxb.MoneyXmlAdapter",
    ),
    (
        "org.faktorips.values.Decimal",
        "org.faktorips.runtime.jaxb.DecimalXmlAdapter",
    ),
    ("java.time.LocalDate", "org.faktorips.runtime.jaxb.LocalDateAdapter"),
];

/// `@XmlJavaTypeAdapter` for fields whose Java class has a registered
/// adapter
///
/// The lookup uses the exact Java class of the datatype. Subclasses of a
/// registered class and unregistered classes get no annotation.
#[derive(Debug, Clone, Default)]
pub struct JaxbFieldAdapterAnnGen {
    adapters: IndexMap<String, String>,
}

impl JaxbFieldAdapterAnnGen {
    /// Generator without adapters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_adapters() -> Self {
        let mut generator = Self::new();
        for (java_class, adapter) in DEFAULT_ADAPTERS {
            generator.add_adapter(java_class, adapter);
        }
        generator
    }

    pub fn add_adapter(&mut self, java_class: &str, adapter: &str) {
        self.adapters
            .insert(java_class.to_string(), adapter.to_string());
    }

    pub fn adapter_for(&self, java_class: &str) -> Option<&str> {
        self.adapters.get(java_class).map(String::as_str)
    }
}

impl AnnotationGenerator for JaxbFieldAdapterAnnGen {
    fn name(&self) -> &'static str {
        "JaxbFieldAdapterAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_attribute()
            .is_some_and(|a| self.adapter_for(&a.datatype.java_class).is_some())
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let adapter = node
            .as_attribute()
            .and_then(|a| self.adapter_for(&a.datatype.java_class))
            .ok_or_else(|| wrong_node(self.name(), node))?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation(runtime::XML_JAVA_TYPE_ADAPTER, None)
            .append("(")
            .append_class_name(adapter)
            .append_ln(".class)");
        Ok(code.build())
    }
}
