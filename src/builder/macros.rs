//! Macros for declaring states and transition trees.

/// Generate a state enum and its `State` implementation.
///
/// Variants are named after themselves unless a label is given.
///
/// # Example
///
/// ```
/// use waypoint::core::State;
/// use waypoint::state_enum;
///
/// state_enum! {
///     pub enum OrderState {
///         Created = "CREATED",
///         Processing = "PROCESSING",
///         Fulfilled,
///     }
/// }
///
/// assert_eq!(OrderState::Created.name(), "CREATED");
/// assert_eq!(OrderState::Fulfilled.name(), "Fulfilled");
/// assert_eq!(OrderState::Processing.to_string(), "PROCESSING");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $(#[serde(rename = $label)])?
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::__state_name!($variant $($label)?)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __state_name {
    ($variant:ident) => {
        stringify!($variant)
    };
    ($variant:ident $label:literal) => {
        $label
    };
}

/// Declare a transition tree.
///
/// `state => [children]` declares a node; a bare `state` declares an edge to
/// a state with no further edges from this position.
///
/// # Example
///
/// ```
/// use waypoint::graph::TransitionSpec;
/// use waypoint::{state_enum, transitions};
///
/// state_enum! {
///     enum Order {
///         Created,
///         Processing,
///         Fulfilled,
///         Cancelled,
///     }
/// }
///
/// use Order::*;
///
/// let tree = transitions! {
///     Created => [
///         Processing => [Fulfilled, Cancelled],
///         Cancelled,
///     ]
/// };
///
/// assert_eq!(
///     tree,
///     TransitionSpec::new(Created)
///         .then(TransitionSpec::new(Processing).to(Fulfilled).to(Cancelled))
///         .to(Cancelled)
/// );
/// ```
#[macro_export]
macro_rules! transitions {
    ($state:expr $(,)?) => {
        $crate::graph::TransitionSpec::new($state)
    };
    ($state:expr => [ $($children:tt)* ] $(,)?) => {
        $crate::__transition_children!($crate::graph::TransitionSpec::new($state); $($children)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __transition_children {
    ($node:expr;) => {
        $node
    };
    ($node:expr; $state:expr => [ $($inner:tt)* ] $(, $($rest:tt)*)?) => {
        $crate::__transition_children!(
            $node.then($crate::transitions!($state => [ $($inner)* ]));
            $($($rest)*)?
        )
    };
    ($node:expr; $state:expr $(, $($rest:tt)*)?) => {
        $crate::__transition_children!($node.to($state); $($($rest)*)?)
    };
}
