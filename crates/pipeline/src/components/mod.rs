//! Component registry: one builder per component type, validated
//! exhaustively at startup
//!
//! A planned type with no registered builder is a planner/registry mismatch.
//! That is a programming error and it fails loudly; builders are never
//! skipped silently.

use shoptalk_types::{
	ChatComponent, ComponentContext, ComponentType, RegistryError, RegistryResult,
};
use std::collections::HashMap;

pub mod builders;

pub use builders::register_default_builders;

/// A pure mapping from context slices to one serializable UI payload
pub trait ComponentBuilder: Send + Sync {
	/// The component type this builder produces
	fn component_type(&self) -> ComponentType;

	/// Build the component payload; no I/O, no mutation of the context
	fn build(&self, context: &ComponentContext) -> ChatComponent;
}

/// Fixed mapping from the closed component enum to builders
pub struct ComponentRegistry {
	builders: HashMap<ComponentType, Box<dyn ComponentBuilder>>,
}

impl ComponentRegistry {
	/// Empty registry; register builders before use
	pub fn new() -> Self {
		Self {
			builders: HashMap::new(),
		}
	}

	/// Registry with every default builder registered
	pub fn with_defaults() -> Self {
		let mut registry = Self::new();
		register_default_builders(&mut registry);
		registry
	}

	pub fn register(&mut self, builder: Box<dyn ComponentBuilder>) {
		self.builders.insert(builder.component_type(), builder);
	}

	/// Look up the builder for a planned type
	pub fn builder_for(&self, component_type: ComponentType) -> RegistryResult<&dyn ComponentBuilder> {
		self.builders
			.get(&component_type)
			.map(|b| b.as_ref())
			.ok_or(RegistryError::MissingBuilder { component_type })
	}

	/// Check that every component type has a builder
	///
	/// Run at startup so a missing mapping is caught before the first
	/// request, not inside one.
	pub fn validate(&self) -> RegistryResult<()> {
		let missing: Vec<ComponentType> = ComponentType::ALL
			.iter()
			.copied()
			.filter(|ty| !self.builders.contains_key(ty))
			.collect();
		if missing.is_empty() {
			Ok(())
		} else {
			Err(RegistryError::IncompleteRegistry { missing })
		}
	}

	pub fn len(&self) -> usize {
		self.builders.len()
	}

	pub fn is_empty(&self) -> bool {
		self.builders.is_empty()
	}
}

impl Default for ComponentRegistry {
	fn default() -> Self {
		Self::with_defaults()
	}
}

/// Build one component per planned type, strictly in planned order
///
/// Order is part of the UI contract: summary first, action components last.
pub fn build_components(
	registry: &ComponentRegistry,
	component_types: &[ComponentType],
	context: &ComponentContext,
) -> RegistryResult<Vec<ChatComponent>> {
	let mut components = Vec::with_capacity(component_types.len());
	for ty in component_types {
		let builder = registry.builder_for(*ty)?;
		components.push(builder.build(context));
	}
	Ok(components)
}
