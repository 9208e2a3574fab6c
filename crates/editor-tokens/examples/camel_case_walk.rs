//! Camel-case walk example
//!
//! Prints every stop the caret visits when moving forward and backward through a snippet.

use editor_tokens::{CamelCaseCommand, CamelCaseEdit, CaretState, NavigationConfig};
use editor_tokens_simple::SimpleLexer;

fn main() {
    let source = r#"let parseHTTPResponse = "${requestBody}"; // done"#;
    let hierarchy = SimpleLexer::c_like()
        .unwrap()
        .hierarchy(source)
        .unwrap();
    let config = NavigationConfig::default();
    let chars: Vec<char> = source.chars().collect();

    println!("{source}");
    let mut caret = 0;
    loop {
        let CamelCaseEdit::MoveCaret { offset } =
            CamelCaseCommand::MoveNext.execute(&hierarchy, CaretState::at(caret), &config)
        else {
            unreachable!();
        };
        if offset == caret {
            break;
        }
        let marker: String = chars[..offset].iter().map(|_| ' ').collect();
        println!("{marker}^ {offset}");
        caret = offset;
    }

    let mut stops = Vec::new();
    while caret > 0 {
        let CamelCaseEdit::MoveCaret { offset } =
            CamelCaseCommand::MovePrevious.execute(&hierarchy, CaretState::at(caret), &config)
        else {
            unreachable!();
        };
        stops.push(offset);
        caret = offset;
    }
    println!("backward stops: {stops:?}");
}
