//! The value set aggregate shared by all kinds

use crate::context::ValueSetContext;
use crate::derived::DerivedValueSet;
use crate::enumeration::EnumValueSet;
use crate::error::{ValueSetError, ValueSetResult};
use crate::kind::ValueSetKind;
use crate::range::RangeValueSet;
use crate::string_length::StringLengthValueSet;
use crate::unrestricted::UnrestrictedValueSet;
use crate::validation::{self, ValueSetValidator};
use ipsgen_core::MessageList;
use serde::{Deserialize, Serialize};

/// Reference to the element owning a value set
///
/// The datatype is stored by qualified name only. It may point to nothing
/// while the user is in the middle of changing the owner's datatype.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueSetOwnerRef {
    pub id: String,
    pub datatype: String,
}

impl ValueSetOwnerRef {
    pub fn new(id: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            datatype: datatype.into(),
        }
    }
}

/// Properties whose change is reported to the owning container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ValueSetProperty {
    Abstract,
    ContainsNull,
    Values,
    LowerBound,
    UpperBound,
    Step,
    Empty,
    MaximumLength,
    Owner,
}

/// Kind-specific part of a value set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueSetContent {
    Unrestricted(UnrestrictedValueSet),
    Enum(EnumValueSet),
    Range(RangeValueSet),
    StringLength(StringLengthValueSet),
    Derived(DerivedValueSet),
}

impl ValueSetContent {
    pub fn kind(&self) -> ValueSetKind {
        match self {
            ValueSetContent::Unrestricted(_) => ValueSetKind::Unrestricted,
            ValueSetContent::Enum(_) => ValueSetKind::Enum,
            ValueSetContent::Range(_) => ValueSetKind::Range,
            ValueSetContent::StringLength(_) => ValueSetKind::StringLength,
            ValueSetContent::Derived(_) => ValueSetKind::Derived,
        }
    }

    /// Fresh content of the given kind.
    pub fn default_for(kind: ValueSetKind) -> Self {
        match kind {
            ValueSetKind::Unrestricted => ValueSetContent::Unrestricted(UnrestrictedValueSet::default()),
            ValueSetKind::Enum => ValueSetContent::Enum(EnumValueSet::default()),
            ValueSetKind::Range => ValueSetContent::Range(RangeValueSet::default()),
            ValueSetKind::StringLength => {
                ValueSetContent::StringLength(StringLengthValueSet::default())
            }
            ValueSetKind::Derived => ValueSetContent::Derived(DerivedValueSet::default()),
        }
    }

    fn stored_contains_null(&self) -> bool {
        match self {
            ValueSetContent::Unrestricted(u) => u.contains_null,
            ValueSetContent::Enum(e) => e.contains_null_entry(),
            ValueSetContent::Range(r) => r.contains_null,
            ValueSetContent::StringLength(s) => s.contains_null,
            ValueSetContent::Derived(_) => true,
        }
    }
}

/// The permissible values of a typed attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueSet {
    #[serde(default)]
    id: String,

    #[serde(skip)]
    owner: ValueSetOwnerRef,

    /// Absent in older documents, which therefore read as concrete sets.
    #[serde(default, rename = "abstract")]
    abstract_flag: bool,

    #[serde(flatten)]
    content: ValueSetContent,

    #[serde(skip)]
    pending_changes: Vec<ValueSetProperty>,
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.owner == other.owner
            && self.abstract_flag == other.abstract_flag
            && self.content == other.content
    }
}

impl Eq for ValueSet {}

impl ValueSet {
    pub fn new(owner: ValueSetOwnerRef, id: impl Into<String>, content: ValueSetContent) -> Self {
        Self {
            id: id.into(),
            owner,
            abstract_flag: false,
            content,
            pending_changes: Vec::new(),
        }
    }

    pub fn unrestricted(owner: ValueSetOwnerRef, id: impl Into<String>, contains_null: bool) -> Self {
        Self::new(
            owner,
            id,
            ValueSetContent::Unrestricted(UnrestrictedValueSet::new(contains_null)),
        )
    }

    pub fn enumeration(owner: ValueSetOwnerRef, id: impl Into<String>, set: EnumValueSet) -> Self {
        Self::new(owner, id, ValueSetContent::Enum(set))
    }

    pub fn range(owner: ValueSetOwnerRef, id: impl Into<String>, set: RangeValueSet) -> Self {
        Self::new(owner, id, ValueSetContent::Range(set))
    }

    pub fn string_length(
        owner: ValueSetOwnerRef,
        id: impl Into<String>,
        set: StringLengthValueSet,
    ) -> Self {
        Self::new(owner, id, ValueSetContent::StringLength(set))
    }

    pub fn derived(owner: ValueSetOwnerRef, id: impl Into<String>) -> Self {
        Self::new(owner, id, ValueSetContent::Derived(DerivedValueSet::default()))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> &ValueSetOwnerRef {
        &self.owner
    }

    /// Re-parent the set, e.g. after loading or when the owner's datatype changes.
    pub fn set_owner(&mut self, owner: ValueSetOwnerRef, id: impl Into<String>) {
        let id = id.into();
        if self.owner != owner || self.id != id {
            self.owner = owner;
            self.id = id;
            self.changed(ValueSetProperty::Owner);
        }
    }

    pub fn content(&self) -> &ValueSetContent {
        &self.content
    }

    pub fn kind(&self) -> ValueSetKind {
        self.content.kind()
    }

    pub fn is_abstract(&self) -> bool {
        self.abstract_flag
    }

    pub fn is_unrestricted(&self) -> bool {
        self.kind() == ValueSetKind::Unrestricted
    }

    pub fn is_enum(&self) -> bool {
        self.kind() == ValueSetKind::Enum
    }

    pub fn is_range(&self) -> bool {
        self.kind() == ValueSetKind::Range
    }

    pub fn is_string_length(&self) -> bool {
        self.kind() == ValueSetKind::StringLength
    }

    pub fn is_derived(&self) -> bool {
        self.kind() == ValueSetKind::Derived
    }

    pub fn as_enum(&self) -> Option<&EnumValueSet> {
        match &self.content {
            ValueSetContent::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&RangeValueSet> {
        match &self.content {
            ValueSetContent::Range(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_string_length(&self) -> Option<&StringLengthValueSet> {
        match &self.content {
            ValueSetContent::StringLength(s) => Some(s),
            _ => None,
        }
    }

    /// Identity comparison by kind tag.
    pub fn is_same_type_of_value_set(&self, other: &ValueSet) -> bool {
        self.kind() == other.kind()
    }

    /// Mark the set as a placeholder refined by subtypes.
    ///
    /// Fails without touching the set when asked to make an unrestricted
    /// set abstract.
    pub fn set_abstract(&mut self, is_abstract: bool) -> ValueSetResult<()> {
        if is_abstract && self.is_unrestricted() {
            return Err(ValueSetError::AbstractUnrestricted {
                id: self.id.clone(),
            });
        }
        if self.abstract_flag != is_abstract {
            self.abstract_flag = is_abstract;
            self.changed(ValueSetProperty::Abstract);
        }
        Ok(())
    }

    /// Whether null is a member of the set.
    ///
    /// Always false for primitive datatypes, whatever the stored flag says.
    pub fn is_contains_null(&self, ctx: &ValueSetContext<'_>) -> bool {
        if let Some(datatype) = ctx.resolve(&self.owner.datatype)
            && datatype.is_primitive()
        {
            return false;
        }
        self.content.stored_contains_null()
    }

    /// The stored null flag, ignoring the datatype.
    pub fn stored_contains_null(&self) -> bool {
        self.content.stored_contains_null()
    }

    pub fn set_contains_null(&mut self, contains_null: bool) -> ValueSetResult<()> {
        let changed = match &mut self.content {
            ValueSetContent::Unrestricted(u) => replace_flag(&mut u.contains_null, contains_null),
            ValueSetContent::Range(r) => replace_flag(&mut r.contains_null, contains_null),
            ValueSetContent::StringLength(s) => replace_flag(&mut s.contains_null, contains_null),
            ValueSetContent::Enum(e) => e.set_contains_null(contains_null),
            ValueSetContent::Derived(_) => {
                return Err(ValueSetError::UnsupportedOperation {
                    operation: "set_contains_null",
                    kind: ValueSetKind::Derived,
                });
            }
        };
        if changed {
            self.changed(ValueSetProperty::ContainsNull);
        }
        Ok(())
    }

    /// Append a value to an enum value set.
    pub fn add_value(&mut self, value: Option<&str>) -> ValueSetResult<()> {
        match &mut self.content {
            ValueSetContent::Enum(e) => {
                e.add_value(value.map(str::to_string));
                self.changed(ValueSetProperty::Values);
                Ok(())
            }
            other => Err(ValueSetError::UnsupportedOperation {
                operation: "add_value",
                kind: other.kind(),
            }),
        }
    }

    /// Remove every occurrence of a value from an enum value set.
    pub fn remove_value(&mut self, value: Option<&str>) -> ValueSetResult<bool> {
        match &mut self.content {
            ValueSetContent::Enum(e) => {
                let removed = e.remove_value(value);
                if removed {
                    self.changed(ValueSetProperty::Values);
                }
                Ok(removed)
            }
            other => Err(ValueSetError::UnsupportedOperation {
                operation: "remove_value",
                kind: other.kind(),
            }),
        }
    }

    /// Set the bounds and step of a range value set.
    pub fn set_range(
        &mut self,
        lower_bound: Option<&str>,
        upper_bound: Option<&str>,
        step: Option<&str>,
    ) -> ValueSetResult<()> {
        let ValueSetContent::Range(range) = &mut self.content else {
            return Err(ValueSetError::UnsupportedOperation {
                operation: "set_range",
                kind: self.content.kind(),
            });
        };
        let mut changes = Vec::new();
        if replace_value(&mut range.lower_bound, lower_bound) {
            changes.push(ValueSetProperty::LowerBound);
        }
        if replace_value(&mut range.upper_bound, upper_bound) {
            changes.push(ValueSetProperty::UpperBound);
        }
        if replace_value(&mut range.step, step) {
            changes.push(ValueSetProperty::Step);
        }
        for change in changes {
            self.changed(change);
        }
        Ok(())
    }

    pub fn set_maximum_length(&mut self, maximum_length: Option<&str>) -> ValueSetResult<()> {
        let ValueSetContent::StringLength(set) = &mut self.content else {
            return Err(ValueSetError::UnsupportedOperation {
                operation: "set_maximum_length",
                kind: self.content.kind(),
            });
        };
        if replace_value(&mut set.maximum_length, maximum_length) {
            self.changed(ValueSetProperty::MaximumLength);
        }
        Ok(())
    }

    /// Whether `value` (`None` for null) is a member of the set.
    ///
    /// Fails closed: an unresolvable datatype or an unparsable value yields
    /// `false`.
    pub fn contains_value(&self, value: Option<&str>, ctx: &ValueSetContext<'_>) -> bool {
        let Some(datatype) = ctx.resolve(&self.owner.datatype) else {
            return false;
        };
        if !datatype.is_parsable(value) {
            return false;
        }
        let Some(value) = value else {
            return self.is_contains_null(ctx);
        };
        match &self.content {
            ValueSetContent::Unrestricted(_) | ValueSetContent::Derived(_) => true,
            ValueSetContent::Enum(e) => e.contains_non_null(value, datatype),
            ValueSetContent::Range(r) => r.contains_non_null(value, datatype),
            ValueSetContent::StringLength(s) => s.contains_non_null(value),
        }
    }

    /// Whether every value of `subset` is a member of this set.
    ///
    /// The subset's datatype must be assignment compatible with this set's
    /// datatype, not merely equal.
    pub fn contains_value_set(&self, subset: &ValueSet, ctx: &ValueSetContext<'_>) -> bool {
        let (Some(datatype), Some(sub_datatype)) = (
            ctx.resolve(&self.owner.datatype),
            ctx.resolve(&subset.owner.datatype),
        ) else {
            return false;
        };
        if !ctx.datatypes().is_covariant(sub_datatype, datatype) {
            return false;
        }

        let null_compatible = self.is_contains_null(ctx) || !subset.is_contains_null(ctx);
        match &self.content {
            ValueSetContent::Unrestricted(_) => {
                self.is_contains_null(ctx) || !subset.is_contains_null(ctx) || subset.is_derived()
            }
            ValueSetContent::Derived(_) => true,
            ValueSetContent::Enum(this) => match &subset.content {
                ValueSetContent::Enum(sub) => {
                    null_compatible
                        && sub
                            .non_null_values()
                            .all(|v| this.contains_non_null(v, datatype))
                }
                _ => false,
            },
            ValueSetContent::Range(this) => match &subset.content {
                ValueSetContent::Range(sub) => null_compatible && this.contains_range(sub, datatype),
                ValueSetContent::Enum(sub) => {
                    null_compatible
                        && sub
                            .non_null_values()
                            .all(|v| this.contains_non_null(v, datatype))
                }
                _ => false,
            },
            ValueSetContent::StringLength(this) => match &subset.content {
                ValueSetContent::StringLength(sub) => {
                    null_compatible && this.contains_string_length(sub)
                }
                ValueSetContent::Enum(sub) => {
                    null_compatible && sub.non_null_values().all(|v| this.contains_non_null(v))
                }
                _ => false,
            },
        }
    }

    /// Whether this set (of a subtype's attribute) is at least as
    /// restrictive as `other` (of the supertype's attribute).
    pub fn is_detailed_specification_of(
        &self,
        other: &ValueSet,
        ctx: &ValueSetContext<'_>,
    ) -> bool {
        if other.is_unrestricted() || other.is_derived() || other.is_string_length() {
            return other.contains_value_set(self, ctx);
        }
        if !self.is_same_type_of_value_set(other) {
            if ctx.unified_value_sets() && self.is_enum() && other.is_range() {
                return other.contains_value_set(self, ctx);
            }
            return false;
        }
        if other.is_abstract() {
            // an abstract set only fixes the kind
            return true;
        }
        other.contains_value_set(self, ctx)
    }

    /// Whether the set has no members at all.
    pub fn is_empty(&self, ctx: &ValueSetContext<'_>) -> bool {
        match &self.content {
            ValueSetContent::Unrestricted(_) | ValueSetContent::Derived(_) => false,
            ValueSetContent::Enum(e) => {
                e.non_null_values().next().is_none() && !self.is_contains_null(ctx)
            }
            ValueSetContent::Range(r) => match ctx.resolve(&self.owner.datatype) {
                Some(datatype) => r.is_empty_for(datatype) && !self.is_contains_null(ctx),
                None => r.empty,
            },
            ValueSetContent::StringLength(_) => false,
        }
    }

    /// Deep copy under new ownership.
    pub fn copy(&self, new_owner: ValueSetOwnerRef, new_id: impl Into<String>) -> ValueSet {
        ValueSet {
            id: new_id.into(),
            owner: new_owner,
            abstract_flag: self.abstract_flag,
            content: self.content.clone(),
            pending_changes: Vec::new(),
        }
    }

    /// Copy the state of `source` into this set.
    ///
    /// The abstract flag is copied unless this set is unrestricted;
    /// kind-specific properties only when both sets are of the same kind.
    pub fn set_values_of(&mut self, source: Option<&ValueSet>) {
        let Some(source) = source else {
            return;
        };
        if !self.is_unrestricted() && self.abstract_flag != source.abstract_flag {
            self.abstract_flag = source.abstract_flag;
            self.changed(ValueSetProperty::Abstract);
        }
        if self.is_same_type_of_value_set(source) && self.content != source.content {
            self.content = source.content.clone();
            self.changed(ValueSetProperty::Values);
        }
    }

    /// A new set of another kind for the same owner.
    ///
    /// Keeps the null flag and, where the new kind allows it, the abstract flag.
    pub fn change_kind(&self, kind: ValueSetKind, new_id: impl Into<String>) -> ValueSet {
        let mut value_set = ValueSet::new(
            self.owner.clone(),
            new_id,
            ValueSetContent::default_for(kind),
        );
        if kind != ValueSetKind::Derived {
            // Derived never rejects the flag
            let _ = value_set.set_contains_null(self.stored_contains_null());
        }
        if kind != ValueSetKind::Unrestricted {
            value_set.abstract_flag = self.abstract_flag;
        }
        value_set.pending_changes.clear();
        value_set
    }

    /// Order value sets from general to specific.
    ///
    /// Sets of the same kind compare by their kind-specific properties and
    /// yield -1, 0 or 1; sets of different kinds use
    /// [`Self::compare_different_value_sets`]. Only the sign is meaningful
    /// to callers.
    pub fn compare_to(&self, other: &ValueSet) -> i32 {
        match (&self.content, &other.content) {
            (ValueSetContent::Unrestricted(a), ValueSetContent::Unrestricted(b)) => a.compare(b),
            (ValueSetContent::Enum(a), ValueSetContent::Enum(b)) => a.compare(b),
            (ValueSetContent::Range(a), ValueSetContent::Range(b)) => a.compare(b),
            (ValueSetContent::StringLength(a), ValueSetContent::StringLength(b)) => a.compare(b),
            (ValueSetContent::Derived(_), ValueSetContent::Derived(_)) => 0,
            _ => self.compare_different_value_sets(other),
        }
    }

    /// Fixed precedence between value sets of different kinds.
    ///
    /// A derived receiver yields -2 and a derived argument 2. Unrestricted,
    /// enum and string-length sets sort before everything except
    /// unrestricted sets; ranges sort after everything.
    ///
    /// Enum against string-length yields -1 in both directions, so the
    /// relation is not antisymmetric for that pair.
    pub fn compare_different_value_sets(&self, other: &ValueSet) -> i32 {
        if self.is_derived() {
            return -2;
        }
        if other.is_derived() {
            return 2;
        }
        if self.is_unrestricted() || self.is_enum() || self.is_string_length() {
            if other.is_unrestricted() { 1 } else { -1 }
        } else {
            1
        }
    }

    /// Kind-specific validator for this set.
    pub fn create_validator(&self) -> Box<dyn ValueSetValidator + '_> {
        validation::create_validator(self)
    }

    /// Validate the set. Problems are returned, never raised.
    pub fn validate(&self, ctx: &ValueSetContext<'_>) -> MessageList {
        let messages = self.create_validator().validate(ctx);
        if !messages.is_empty() {
            tracing::debug!(
                value_set = %self.id,
                owner = %self.owner.id,
                count = messages.len(),
                "value set validation reported problems"
            );
        }
        messages
    }

    /// Properties changed since the last call, in change order.
    pub fn take_changes(&mut self) -> Vec<ValueSetProperty> {
        std::mem::take(&mut self.pending_changes)
    }

    fn changed(&mut self, property: ValueSetProperty) {
        if !self.pending_changes.contains(&property) {
            self.pending_changes.push(property);
        }
    }
}

fn replace_flag(flag: &mut bool, value: bool) -> bool {
    let changed = *flag != value;
    *flag = value;
    changed
}

fn replace_value(slot: &mut Option<String>, value: Option<&str>) -> bool {
    if slot.as_deref() == value {
        return false;
    }
    *slot = value.map(str::to_string);
    true
}
