use editor_tokens::{
    CamelCaseCommand, CamelCaseEdit, CamelCaseNavigator, CaretState, NavigationConfig,
    TokenHierarchy, UnicodeWordBoundaries,
};
use editor_tokens_simple::{SimpleLexer, SimpleTokenId};
use pretty_assertions::assert_eq;

// `fooBarBaz` spans 4..13, the document is 18 chars long.
const SOURCE: &str = "int fooBarBaz = 1;";

fn document() -> TokenHierarchy<SimpleTokenId> {
    SimpleLexer::c_like().unwrap().hierarchy(SOURCE).unwrap()
}

fn run(command: CamelCaseCommand, state: CaretState) -> CamelCaseEdit {
    command.execute(&document(), state, &NavigationConfig::default())
}

#[test]
fn test_move_commands_drop_selection() {
    assert_eq!(
        run(CamelCaseCommand::MoveNext, CaretState::at(4)),
        CamelCaseEdit::MoveCaret { offset: 7 }
    );
    assert_eq!(
        run(CamelCaseCommand::MoveNext, CaretState::selecting(0, 7)),
        CamelCaseEdit::MoveCaret { offset: 10 }
    );
    assert_eq!(
        run(CamelCaseCommand::MovePrevious, CaretState::at(13)),
        CamelCaseEdit::MoveCaret { offset: 10 }
    );
}

#[test]
fn test_select_commands_keep_existing_anchor() {
    assert_eq!(
        run(CamelCaseCommand::SelectNext, CaretState::selecting(4, 7)),
        CamelCaseEdit::Select {
            anchor: 4,
            caret: 10
        }
    );
    assert_eq!(
        run(CamelCaseCommand::SelectPrevious, CaretState::at(13)),
        CamelCaseEdit::Select {
            anchor: 13,
            caret: 10
        }
    );
}

#[test]
fn test_delete_prefers_selection() {
    assert_eq!(
        run(CamelCaseCommand::DeleteNext, CaretState::selecting(9, 5)),
        CamelCaseEdit::Delete { range: 5..9 }
    );
    assert_eq!(
        run(CamelCaseCommand::DeleteNext, CaretState::at(4)),
        CamelCaseEdit::Delete { range: 4..7 }
    );
    assert_eq!(
        run(CamelCaseCommand::DeletePrevious, CaretState::at(13)),
        CamelCaseEdit::Delete { range: 10..13 }
    );
    // An empty selection is no selection.
    assert_eq!(
        run(CamelCaseCommand::DeletePrevious, CaretState::selecting(7, 7)),
        CamelCaseEdit::Delete { range: 4..7 }
    );
}

#[test]
fn test_words_only_config_skips_humps() {
    let document = document();
    let config = NavigationConfig::words_only();
    assert_eq!(
        CamelCaseCommand::MoveNext.execute(&document, CaretState::at(4), &config),
        CamelCaseEdit::MoveCaret { offset: 13 }
    );
    assert_eq!(
        CamelCaseCommand::MovePrevious.execute(&document, CaretState::at(13), &config),
        CamelCaseEdit::MoveCaret { offset: 4 }
    );
}

#[test]
fn test_caret_past_end_is_clamped() {
    assert_eq!(
        run(CamelCaseCommand::MoveNext, CaretState::at(100)),
        CamelCaseEdit::MoveCaret { offset: 18 }
    );
    assert_eq!(
        run(CamelCaseCommand::DeleteNext, CaretState::at(100)),
        CamelCaseEdit::Delete { range: 18..18 }
    );
}

#[test]
fn test_execute_with_explicit_navigator() {
    let navigator = CamelCaseNavigator::new(UnicodeWordBoundaries);
    let edit = CamelCaseCommand::SelectNext.execute_with(
        &navigator,
        &document(),
        CaretState::at(0),
        &NavigationConfig::default(),
    );
    assert_eq!(
        edit,
        CamelCaseEdit::Select {
            anchor: 0,
            caret: 3
        }
    );
}
