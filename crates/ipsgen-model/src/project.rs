//! The model of one ipsgen project

use crate::association::Association;
use crate::attribute::Attribute;
use crate::component_type::ComponentType;
use crate::enum_type::{EnumAttribute, EnumContent, EnumType};
use crate::error::{ModelError, ModelResult};
use crate::events::{ChangeListener, ChangeListeners, ContentChangeEvent, ListenerId};
use crate::object::IpsObject;
use crate::policy_cmpt_type::PolicyCmptType;
use crate::product_cmpt_type::ProductCmptType;
use crate::table_structure::TableStructure;
use indexmap::IndexMap;
use ipsgen_core::{DatatypeRegistry, IpsProjectConfig, MessageList, PROJECT_FILE, ValueDatatype, naming};
use ipsgen_valueset::ValueSetContext;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration plus all model objects, keyed by qualified name
#[derive(Debug)]
pub struct IpsProject {
    config: IpsProjectConfig,
    root: Option<PathBuf>,
    objects: IndexMap<String, IpsObject>,
    datatypes: DatatypeRegistry,
    listeners: ChangeListeners,
}

impl IpsProject {
    /// An empty in-memory project.
    pub fn new(config: IpsProjectConfig) -> Self {
        Self {
            config,
            root: None,
            objects: IndexMap::new(),
            datatypes: DatatypeRegistry::with_builtins(),
            listeners: ChangeListeners::new(),
        }
    }

    /// Load `ipsproject.toml` and every `*.toml` file below the model dir.
    ///
    /// Files are read in path order so that object order is stable.
    pub fn load(root: impl AsRef<Path>) -> ModelResult<Self> {
        let root = root.as_ref();
        let config = IpsProjectConfig::from_file(root.join(PROJECT_FILE))?;
        let model_dir = root.join(&config.project.model_dir);

        let mut project = Self::new(config);
        project.root = Some(root.to_path_buf());

        if !model_dir.is_dir() {
            tracing::warn!(dir = %model_dir.display(), "model directory missing, project is empty");
            return Ok(project);
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&model_dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        files.sort();

        for path in files {
            let file_display = path.display().to_string();
            let content = std::fs::read_to_string(&path).map_err(|source| ModelError::Io {
                path: file_display.clone(),
                source,
            })?;
            let object = IpsObject::from_toml(&content, &file_display)?;
            tracing::debug!(object = object.qualified_name(), file = %file_display, "loaded model object");
            project.insert(object)?;
        }
        project.rebuild_datatypes();

        tracing::info!(
            project = %project.config.project.name,
            objects = project.objects.len(),
            "project loaded"
        );
        Ok(project)
    }

    pub fn config(&self) -> &IpsProjectConfig {
        &self.config
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Add an object. Qualified names must be unique across all kinds.
    pub fn add_object(&mut self, object: impl Into<IpsObject>) -> ModelResult<()> {
        let mut object = object.into();
        object.attach();
        let name = object.qualified_name().to_string();
        self.insert(object)?;
        self.rebuild_datatypes();
        self.listeners.fire(&ContentChangeEvent::whole_content(name));
        Ok(())
    }

    fn insert(&mut self, object: IpsObject) -> ModelResult<()> {
        let name = object.qualified_name().to_string();
        if self.objects.contains_key(&name) {
            return Err(ModelError::DuplicateObject(name));
        }
        self.objects.insert(name, object);
        Ok(())
    }

    pub fn remove_object(&mut self, qualified_name: &str) -> Option<IpsObject> {
        let removed = self.objects.shift_remove(qualified_name);
        if removed.is_some() {
            self.rebuild_datatypes();
            self.listeners
                .fire(&ContentChangeEvent::whole_content(qualified_name));
        }
        removed
    }

    pub fn object(&self, qualified_name: &str) -> Option<&IpsObject> {
        self.objects.get(qualified_name)
    }

    pub fn objects(&self) -> impl Iterator<Item = &IpsObject> {
        self.objects.values()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn policy_cmpt_type(&self, qualified_name: &str) -> Option<&PolicyCmptType> {
        match self.objects.get(qualified_name) {
            Some(IpsObject::PolicyCmptType(t)) => Some(t),
            _ => None,
        }
    }

    pub fn product_cmpt_type(&self, qualified_name: &str) -> Option<&ProductCmptType> {
        match self.objects.get(qualified_name) {
            Some(IpsObject::ProductCmptType(t)) => Some(t),
            _ => None,
        }
    }

    pub fn enum_type(&self, qualified_name: &str) -> Option<&EnumType> {
        match self.objects.get(qualified_name) {
            Some(IpsObject::EnumType(t)) => Some(t),
            _ => None,
        }
    }

    pub fn enum_content(&self, qualified_name: &str) -> Option<&EnumContent> {
        match self.objects.get(qualified_name) {
            Some(IpsObject::EnumContent(c)) => Some(c),
            _ => None,
        }
    }

    pub fn table_structure(&self, qualified_name: &str) -> Option<&TableStructure> {
        match self.objects.get(qualified_name) {
            Some(IpsObject::TableStructure(t)) => Some(t),
            _ => None,
        }
    }

    pub fn component_type(&self, qualified_name: &str) -> Option<&dyn ComponentType> {
        self.objects.get(qualified_name)?.as_component_type()
    }

    pub fn policy_cmpt_types(&self) -> impl Iterator<Item = &PolicyCmptType> {
        self.objects.values().filter_map(|o| match o {
            IpsObject::PolicyCmptType(t) => Some(t),
            _ => None,
        })
    }

    pub fn product_cmpt_types(&self) -> impl Iterator<Item = &ProductCmptType> {
        self.objects.values().filter_map(|o| match o {
            IpsObject::ProductCmptType(t) => Some(t),
            _ => None,
        })
    }

    pub fn enum_types(&self) -> impl Iterator<Item = &EnumType> {
        self.objects.values().filter_map(|o| match o {
            IpsObject::EnumType(t) => Some(t),
            _ => None,
        })
    }

    pub fn enum_contents(&self) -> impl Iterator<Item = &EnumContent> {
        self.objects.values().filter_map(|o| match o {
            IpsObject::EnumContent(c) => Some(c),
            _ => None,
        })
    }

    pub fn table_structures(&self) -> impl Iterator<Item = &TableStructure> {
        self.objects.values().filter_map(|o| match o {
            IpsObject::TableStructure(t) => Some(t),
            _ => None,
        })
    }

    // ------------------------------------------------------------------
    // Type hierarchy
    // ------------------------------------------------------------------

    fn supertype_of(&self, qualified_name: &str) -> Option<&str> {
        match self.objects.get(qualified_name)? {
            IpsObject::PolicyCmptType(t) => t.supertype.as_deref(),
            IpsObject::ProductCmptType(t) => t.supertype.as_deref(),
            IpsObject::EnumType(t) => t.supertype.as_deref(),
            _ => None,
        }
    }

    /// Qualified names of all supertypes, nearest first.
    ///
    /// Stops at the first missing supertype and before revisiting a type.
    pub fn supertype_names(&self, qualified_name: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut current = self.supertype_of(qualified_name);
        while let Some(name) = current {
            if name == qualified_name || names.iter().any(|n| n == name) {
                break;
            }
            if !self.objects.contains_key(name) {
                break;
            }
            names.push(name.to_string());
            current = self.supertype_of(name);
        }
        names
    }

    pub fn has_cyclic_hierarchy(&self, qualified_name: &str) -> bool {
        let mut visited = vec![qualified_name];
        let mut current = self.supertype_of(qualified_name);
        while let Some(name) = current {
            if visited.contains(&name) {
                return true;
            }
            visited.push(name);
            current = self.supertype_of(name);
        }
        false
    }

    /// Direct subtypes, in project order.
    pub fn direct_subtypes(&self, qualified_name: &str) -> Vec<&str> {
        self.objects
            .values()
            .filter(|o| self.supertype_of(o.qualified_name()) == Some(qualified_name))
            .map(IpsObject::qualified_name)
            .collect()
    }

    /// All direct and indirect subtypes, in project order.
    pub fn all_subtypes(&self, qualified_name: &str) -> Vec<&str> {
        self.objects
            .values()
            .map(IpsObject::qualified_name)
            .filter(|name| {
                *name != qualified_name
                    && self.supertype_names(name).iter().any(|s| s == qualified_name)
            })
            .collect()
    }

    pub fn is_same_or_subtype(&self, qualified_name: &str, supertype: &str) -> bool {
        qualified_name == supertype
            || self
                .supertype_names(qualified_name)
                .iter()
                .any(|s| s == supertype)
    }

    /// Attribute of a supertype with the given name, nearest first.
    pub fn find_overridden_attribute(&self, type_name: &str, attribute: &str) -> Option<&Attribute> {
        self.supertype_names(type_name)
            .iter()
            .filter_map(|name| self.component_type(name))
            .find_map(|t| t.attribute(attribute))
    }

    /// Names of own and inherited attributes.
    pub fn visible_attribute_names(&self, type_name: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let hierarchy = std::iter::once(type_name.to_string()).chain(self.supertype_names(type_name));
        for name in hierarchy {
            if let Some(ty) = self.component_type(&name) {
                for attribute in ty.attributes() {
                    if !names.contains(&attribute.name) {
                        names.push(attribute.name.clone());
                    }
                }
            }
        }
        names
    }

    /// The association in the target type (or one of its supertypes) that
    /// `association` names as its inverse, if both the name and the target
    /// resolve.
    pub fn find_inverse_association(&self, association: &Association) -> Option<&Association> {
        let inverse = association.inverse.as_deref()?;
        let target = self.component_type(&association.target)?;
        std::iter::once(target)
            .chain(
                self.supertype_names(&association.target)
                    .iter()
                    .filter_map(|name| self.component_type(name))
                    .collect::<Vec<_>>(),
            )
            .find_map(|t| t.association(inverse))
    }

    /// The enum attribute a type's inherited copy refers to.
    pub fn find_enum_attribute_in_supertypes(
        &self,
        enum_type: &str,
        attribute: &str,
    ) -> Option<&EnumAttribute> {
        self.supertype_names(enum_type)
            .iter()
            .filter_map(|name| self.enum_type(name))
            .filter_map(|t| t.attribute(attribute))
            .find(|a| !a.inherited)
    }

    /// Datatype of an enum attribute, following inherited copies upwards.
    pub fn enum_attribute_datatype(&self, enum_type: &str, attribute: &str) -> Option<&str> {
        let own = self.enum_type(enum_type)?.attribute(attribute)?;
        if !own.inherited {
            return own.datatype.as_deref();
        }
        self.find_enum_attribute_in_supertypes(enum_type, attribute)?
            .datatype
            .as_deref()
    }

    // ------------------------------------------------------------------
    // Datatypes
    // ------------------------------------------------------------------

    pub fn datatype_registry(&self) -> &DatatypeRegistry {
        &self.datatypes
    }

    pub fn resolve_datatype(&self, qualified_name: &str) -> Option<&ValueDatatype> {
        self.datatypes.resolve(qualified_name)
    }

    /// Value set context honoring the project's generator settings.
    pub fn value_set_context(&self) -> ValueSetContext<'_> {
        ValueSetContext::new(&self.datatypes)
            .with_unified_value_sets(self.config.generator.unified_value_sets)
    }

    /// Fully qualified Java class generated for a model object.
    pub fn java_class_name(&self, qualified_name: &str) -> String {
        let package = naming::package_of(qualified_name);
        let package = if package.is_empty() {
            self.config.project.base_package.clone()
        } else {
            naming::qualify(&self.config.project.base_package, package)
        };
        naming::qualify(&package, naming::simple_name(qualified_name))
    }

    /// Built-ins plus one enum datatype per enum type.
    fn rebuild_datatypes(&mut self) {
        let mut registry = DatatypeRegistry::with_builtins();
        for enum_type in self.enum_types() {
            let mut ids = enum_type.identifier_values();
            for content in self
                .enum_contents()
                .filter(|c| c.enum_type == enum_type.qualified_name)
            {
                if let Some(index) = enum_type.attributes.iter().position(|a| a.identifier) {
                    ids.extend(
                        content
                            .values
                            .iter()
                            .filter_map(|v| v.cell(index).map(str::to_string)),
                    );
                }
            }
            let values = if enum_type.is_abstract || (enum_type.extensible && ids.is_empty()) {
                None
            } else {
                Some(ids)
            };
            registry.register(ValueDatatype::enumeration(
                enum_type.qualified_name.clone(),
                self.java_class_name(&enum_type.qualified_name),
                enum_type.supertype.clone(),
                values,
            ));
        }
        self.datatypes = registry;
    }

    // ------------------------------------------------------------------
    // Changes
    // ------------------------------------------------------------------

    pub fn add_change_listener(&self, listener: ChangeListener) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn add_change_listener_for(
        &self,
        qualified_name: impl Into<String>,
        listener: ChangeListener,
    ) -> ListenerId {
        self.listeners.add_for(qualified_name, listener)
    }

    pub fn remove_change_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub(crate) fn fire(&self, event: &ContentChangeEvent) {
        self.listeners.fire(event);
    }

    /// Mutate one object and notify listeners.
    ///
    /// Value set changes made through the closure are reported per
    /// attribute and property; everything else as a whole-content change.
    pub fn modify<F>(&mut self, qualified_name: &str, f: F) -> ModelResult<()>
    where
        F: FnOnce(&mut IpsObject),
    {
        let object = self
            .objects
            .get_mut(qualified_name)
            .ok_or_else(|| ModelError::ObjectNotFound(qualified_name.to_string()))?;
        f(object);
        let events = object.drain_value_set_changes();
        object.attach();
        self.rebuild_datatypes();

        self.fire(&ContentChangeEvent::whole_content(qualified_name));
        for event in &events {
            self.fire(event);
        }
        Ok(())
    }

    pub(crate) fn enum_type_mut(&mut self, qualified_name: &str) -> ModelResult<&mut EnumType> {
        match self.objects.get_mut(qualified_name) {
            Some(IpsObject::EnumType(t)) => Ok(t),
            Some(_) => Err(ModelError::WrongObjectType {
                qualified_name: qualified_name.to_string(),
                expected: "enum type",
            }),
            None => Err(ModelError::ObjectNotFound(qualified_name.to_string())),
        }
    }

    pub(crate) fn after_structural_change(&mut self) {
        self.rebuild_datatypes();
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Validate the configuration and every object. Never short-circuits.
    pub fn validate(&self) -> MessageList {
        let mut messages = self.config.validate(self.root.as_deref());
        let ctx = self.value_set_context();
        for object in self.objects.values() {
            let object_messages = match object {
                IpsObject::PolicyCmptType(t) => t.validate(self, &ctx),
                IpsObject::ProductCmptType(t) => t.validate(self, &ctx),
                IpsObject::EnumType(t) => t.validate(self),
                IpsObject::EnumContent(c) => c.validate(self),
                IpsObject::TableStructure(t) => t.validate(self),
            };
            if !object_messages.is_empty() {
                tracing::debug!(
                    object = object.qualified_name(),
                    count = object_messages.len(),
                    "validation reported problems"
                );
            }
            messages.extend(object_messages);
        }
        messages
    }

    /// Validate a single object.
    pub fn validate_object(&self, qualified_name: &str) -> ModelResult<MessageList> {
        let object = self
            .object(qualified_name)
            .ok_or_else(|| ModelError::ObjectNotFound(qualified_name.to_string()))?;
        let ctx = self.value_set_context();
        Ok(match object {
            IpsObject::PolicyCmptType(t) => t.validate(self, &ctx),
            IpsObject::ProductCmptType(t) => t.validate(self, &ctx),
            IpsObject::EnumType(t) => t.validate(self),
            IpsObject::EnumContent(c) => c.validate(self),
            IpsObject::TableStructure(t) => t.validate(self),
        })
    }

    /// Write every object back below the model dir, one file per object.
    pub fn save(&self) -> ModelResult<()> {
        let Some(root) = &self.root else {
            return Ok(());
        };
        let model_dir = root.join(&self.config.project.model_dir);
        for object in self.objects.values() {
            let relative = object.qualified_name().replace('.', "/");
            let path = model_dir.join(format!("{relative}.toml"));
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|source| ModelError::Io {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
            std::fs::write(&path, object.to_toml()?).map_err(|source| ModelError::Io {
                path: path.display().to_string(),
                source,
            })?;
        }
        Ok(())
    }
}
