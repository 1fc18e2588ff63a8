/// Creates a single chat [`Message`](crate::Message) from a role shorthand.
///
/// ```rust
/// use cassette::{Role, cs_msg};
///
/// let message = cs_msg!(assistant => "Done.");
/// assert_eq!(message.role, Role::Assistant);
/// assert_eq!(message.content, "Done.");
/// ```
#[macro_export]
macro_rules! cs_msg {
    (system => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::System, $content)
    };
    (user => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::User, $content)
    };
    (assistant => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::Assistant, $content)
    };
    (tool => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::Tool, $content)
    };
    ($role:ident => $content:expr $(,)?) => {
        compile_error!("unsupported role: use system, user, assistant, or tool");
    };
}

/// Creates a `Vec<Message>` from role/content pairs.
///
/// ```rust
/// use cassette::{Role, cs_messages};
///
/// let messages = cs_messages![
///     system => "You are concise.",
///     user => "Summarize this repository.",
/// ];
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].role, Role::System);
/// assert_eq!(messages[1].role, Role::User);
/// ```
#[macro_export]
macro_rules! cs_messages {
    () => {
        Vec::<$crate::Message>::new()
    };
    ($($role:ident => $content:expr),+ $(,)?) => {
        vec![$($crate::cs_msg!($role => $content)),+]
    };
}

/// Builds a [`Scenario`](crate::Scenario) from [`ScenarioBuilder`](crate::ScenarioBuilder)
/// steps written as calls.
///
/// Text steps get their snapshots computed; any builder method may appear.
///
/// ```rust
/// use cassette::{StreamEvent, cs_scenario};
///
/// let scenario = cs_scenario![
///     text("Hello"),
///     text(" world"),
///     finish("stop", 10, 5),
/// ];
///
/// assert_eq!(scenario.events()[1], StreamEvent::text_delta(" world", "Hello world"));
/// ```
#[macro_export]
macro_rules! cs_scenario {
    () => {
        $crate::Scenario::new(Vec::new())
    };
    ($($step:ident ( $($arg:expr),* $(,)? )),+ $(,)?) => {
        $crate::ScenarioBuilder::new()
            $(.$step($($arg),*))+
            .build()
    };
}
