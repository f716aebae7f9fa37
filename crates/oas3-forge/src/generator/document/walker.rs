//! Generic traversal over the heterogeneous document tree.
//!
//! Dispatch is over a closed set of node variants so a new node kind cannot
//! be silently skipped. The visitor steers recursion per node: descend into
//! children, prune the subtree, or halt the whole traversal (the signal the
//! resolver uses once a lookup succeeds).

use super::{Components, Document, MediaType, Operation, Parameter, PathItem, RequestBody, Response, Schema};

/// One node of the document tree, by kind.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
  Document(&'a Document),
  Components(&'a Components),
  PathItem(&'a PathItem),
  Operation(&'a Operation),
  Parameter(&'a Parameter),
  RequestBody(&'a RequestBody),
  Response(&'a Response),
  MediaType(&'a MediaType),
  Schema(&'a Schema),
}

/// Visitor verdict for the node just seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
  /// Recurse into this node's children.
  Descend,
  /// Skip this node's children; siblings are still visited.
  Prune,
  /// Short-circuit the entire traversal.
  Halt,
}

/// Calls `visit` on `node` and, unless told otherwise, on every node below
/// it. Absent optional children are skipped without error. Returns
/// [`Flow::Halt`] when the visitor halted the traversal, [`Flow::Descend`]
/// otherwise.
pub fn walk<'a, F>(node: Node<'a>, visit: &mut F) -> Flow
where
  F: FnMut(Node<'a>) -> Flow,
{
  match visit(node) {
    Flow::Halt => return Flow::Halt,
    Flow::Prune => return Flow::Descend,
    Flow::Descend => {}
  }

  match node {
    Node::Document(document) => {
      if walk(Node::Components(&document.components), visit) == Flow::Halt {
        return Flow::Halt;
      }
      for item in document.paths.values() {
        if walk(Node::PathItem(item), visit) == Flow::Halt {
          return Flow::Halt;
        }
      }
    }
    Node::Components(components) => {
      for schema in components.schemas.values() {
        if walk(Node::Schema(schema), visit) == Flow::Halt {
          return Flow::Halt;
        }
      }
      for parameter in components.parameters.values() {
        if walk(Node::Parameter(parameter), visit) == Flow::Halt {
          return Flow::Halt;
        }
      }
      for body in components.request_bodies.values() {
        if walk(Node::RequestBody(body), visit) == Flow::Halt {
          return Flow::Halt;
        }
      }
      for response in components.responses.values() {
        if walk(Node::Response(response), visit) == Flow::Halt {
          return Flow::Halt;
        }
      }
    }
    Node::PathItem(item) => {
      for (_, operation) in item.methods() {
        if walk(Node::Operation(operation), visit) == Flow::Halt {
          return Flow::Halt;
        }
      }
    }
    Node::Operation(operation) => {
      for parameter in &operation.parameters {
        if walk(Node::Parameter(parameter), visit) == Flow::Halt {
          return Flow::Halt;
        }
      }
      for response in operation.responses.values() {
        if walk(Node::Response(response), visit) == Flow::Halt {
          return Flow::Halt;
        }
      }
      if let Some(body) = &operation.request_body
        && walk(Node::RequestBody(body), visit) == Flow::Halt
      {
        return Flow::Halt;
      }
    }
    Node::Parameter(parameter) => {
      if let Some(schema) = &parameter.schema
        && walk(Node::Schema(schema), visit) == Flow::Halt
      {
        return Flow::Halt;
      }
    }
    Node::RequestBody(body) => {
      for media in body.content.values() {
        if walk(Node::MediaType(media), visit) == Flow::Halt {
          return Flow::Halt;
        }
      }
    }
    Node::Response(response) => {
      for media in response.content.values() {
        if walk(Node::MediaType(media), visit) == Flow::Halt {
          return Flow::Halt;
        }
      }
    }
    Node::MediaType(media) => {
      if let Some(schema) = &media.schema
        && walk(Node::Schema(schema), visit) == Flow::Halt
      {
        return Flow::Halt;
      }
    }
    Node::Schema(schema) => {
      if let Some(items) = &schema.items
        && walk(Node::Schema(items), visit) == Flow::Halt
      {
        return Flow::Halt;
      }
      for property in schema.properties.values() {
        if walk(Node::Schema(property), visit) == Flow::Halt {
          return Flow::Halt;
        }
      }
    }
  }

  Flow::Descend
}

/// Finds the first schema named `name` anywhere below `root`, halting the
/// traversal as soon as it matches.
#[must_use]
pub fn find_schema<'a>(root: Node<'a>, name: &str) -> Option<&'a Schema> {
  let mut found = None;
  walk(root, &mut |node| {
    if let Node::Schema(schema) = node
      && schema.name == name
    {
      found = Some(schema);
      return Flow::Halt;
    }
    Flow::Descend
  });
  found
}

/// Finds the first parameter named `name` anywhere below `root`.
#[must_use]
pub fn find_parameter<'a>(root: Node<'a>, name: &str) -> Option<&'a Parameter> {
  let mut found = None;
  walk(root, &mut |node| {
    if let Node::Parameter(parameter) = node
      && parameter.name == name
    {
      found = Some(parameter);
      return Flow::Halt;
    }
    Flow::Descend
  });
  found
}
