// Integration tests for the Brainfuck execution engine

use braintty::compiler::Compiler;
use braintty::interpreter::engine::{DEFAULT_LOOP_LIMIT, Interpreter};
use braintty::interpreter::errors::RuntimeError;

#[test]
fn test_echo_single_char() {
    let mut interpreter = Interpreter::new();
    interpreter.build(",.").expect("Build failed");

    let result = interpreter.execute("A", false).expect("Execution failed");

    assert_eq!(result, "A");
}

#[test]
fn test_echo_countdown() {
    // Read '9' (code 57), print it, then print-and-decrement until zero
    let mut interpreter = Interpreter::new();
    interpreter.build(",.[.-]").expect("Build failed");

    let result = interpreter.execute("9", false).expect("Execution failed");

    let codes: Vec<u32> = result.chars().map(|c| c as u32).collect();
    assert_eq!(codes.len(), 58, "Expected 58 output values, got {}", codes.len());
    assert_eq!(codes[0], 57);
    assert_eq!(codes[1], 57);
    assert_eq!(codes[57], 1);
    for window in codes[1..].windows(2) {
        assert_eq!(window[0] - 1, window[1], "Countdown not descending: {:?}", window);
    }
}

#[test]
fn test_hello_world() {
    let source = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.\
                  <<+++++++++++++++.>.+++.------.--------.>+.>.";
    let mut interpreter = Interpreter::new();
    interpreter.build(source).expect("Build failed");

    let result = interpreter.execute("", false).expect("Execution failed");

    assert_eq!(result, "Hello World!\n");
}

#[test]
fn test_multiply_loop() {
    // 4 * 4 accumulated into the second cell
    let mut interpreter = Interpreter::new();
    interpreter.build("++++[>++++<-]>.").expect("Build failed");

    let execution = interpreter
        .execute_detailed("", false)
        .expect("Execution failed");

    assert!(!execution.error);
    assert_eq!(execution.responses.len(), 1);
    assert_eq!(execution.responses[0].code(), 16);
}

#[test]
fn test_cell_wrap_terminates_loop() {
    // Incrementing wraps 255 -> 0, so this loop ends without hitting the ceiling
    let mut interpreter = Interpreter::new();
    interpreter.build("+[+]").expect("Build failed");

    let execution = interpreter
        .execute_detailed("", false)
        .expect("Execution failed");

    assert!(!execution.error, "Wrapping loop should end on its own");
    assert_eq!(execution.result, "");
}

// === INPUT HANDLING ===

#[test]
fn test_exhausted_input_reads_zero() {
    let mut interpreter = Interpreter::new();
    interpreter.build(",,.").expect("Build failed");

    let execution = interpreter
        .execute_detailed("A", false)
        .expect("Execution failed");

    // The second ',' found nothing and must leave a zero behind
    assert!(!execution.error);
    assert_eq!(execution.responses.len(), 1);
    assert_eq!(execution.responses[0].code(), 0);
}

#[test]
fn test_read_with_no_input_at_all() {
    let mut interpreter = Interpreter::new();
    interpreter.build(",.").expect("Build failed");

    let result = interpreter.execute("", false).expect("Execution failed");

    assert_eq!(result, "\0");
}

#[test]
fn test_inert_characters_are_skipped() {
    let mut interpreter = Interpreter::new();
    interpreter.build("+ +a.").expect("Build failed");

    let execution = interpreter
        .execute_detailed("", false)
        .expect("Execution failed");

    assert_eq!(execution.responses.len(), 1);
    assert_eq!(execution.responses[0].code(), 2, "Skips must not change cells");
    assert_eq!(execution.skipped.get(&' '), Some(&1));
    assert_eq!(execution.skipped.get(&'a'), Some(&1));
}

// === LOOPS AND THE ITERATION CEILING ===

#[test]
fn test_zero_iteration_loop() {
    // Cell is zero on entry, so the body never runs
    let mut interpreter = Interpreter::new();
    interpreter.build("[.]+.").expect("Build failed");

    let result = interpreter.execute("", false).expect("Execution failed");

    assert_eq!(result, "\u{1}");
}

#[test]
fn test_loop_ceiling_keeps_partial_output() {
    let mut interpreter = Interpreter::new();
    interpreter.build("+[.]").expect("Build failed");
    interpreter.set_loop_limit(5).expect("Setting limit failed");

    let execution = interpreter
        .execute_detailed("", false)
        .expect("Execution failed");

    assert!(execution.error, "Endless loop must flag the execution");
    assert_eq!(execution.result, "\u{1}".repeat(5), "One output per allowed pass");
}

#[test]
fn test_code_after_abandoned_loop_still_runs() {
    let mut interpreter = Interpreter::new();
    interpreter.build("+[.].").expect("Build failed");
    interpreter.set_loop_limit(5).expect("Setting limit failed");

    let execution = interpreter
        .execute_detailed("", false)
        .expect("Execution failed");

    assert!(execution.error);
    assert_eq!(
        execution.responses.len(),
        6,
        "The trailing '.' must run after the loop is abandoned"
    );
}

#[test]
fn test_compiled_loop_ceiling_is_hard() {
    let mut compiler = Compiler::new();
    compiler.build("+[.]").expect("Build failed");
    compiler.set_loop_limit(5).expect("Setting limit failed");

    let result = compiler.run("");

    assert!(result.is_err(), "Expected loop limit error");
    match result.unwrap_err() {
        RuntimeError::LoopLimitExceeded { at, limit } => {
            assert_eq!(at, 3, "Failure should point at the closing bracket");
            assert_eq!(limit, 5);
        }
        e => panic!("Expected LoopLimitExceeded, got {:?}", e),
    }
}

#[test]
fn test_unmatched_open_loop_absorbs_tail() {
    // The open loop swallows everything to the end of the source
    let mut interpreter = Interpreter::new();
    interpreter.build(",[+.").expect("Build failed");

    let execution = interpreter
        .execute_detailed("A", false)
        .expect("Execution failed");

    let codes: Vec<u32> = execution.result.chars().map(|c| c as u32).collect();
    assert!(!execution.error);
    assert_eq!(codes.len(), 191, "65 wraps to 0 after 191 increments");
    assert_eq!(codes[0], 66);
    assert_eq!(codes[190], 0);
}

// === BUILD AND USAGE ERRORS ===

#[test]
fn test_unmatched_close_is_a_build_error() {
    let mut interpreter = Interpreter::new();
    let result = interpreter.build("+]");

    assert!(result.is_err(), "Expected build error");
    let error = result.unwrap_err();
    assert_eq!(error.at, 1);
    assert!(
        error.to_string().contains("position 1"),
        "Error message should carry the position, got: {}",
        error
    );
}

#[test]
fn test_close_after_balanced_loop_is_rejected() {
    let mut interpreter = Interpreter::new();
    let result = interpreter.build("[-]]");

    assert!(result.is_err(), "Expected build error");
    assert_eq!(result.unwrap_err().at, 3);
}

#[test]
fn test_failed_build_clears_previous_program() {
    let mut interpreter = Interpreter::new();
    interpreter.build("+.").expect("Build failed");
    assert!(interpreter.is_built());

    let result = interpreter.build("]");
    assert!(result.is_err());
    assert!(!interpreter.is_built(), "Broken build must not keep the old program");
    assert!(matches!(
        interpreter.execute("", false),
        Err(RuntimeError::NotBuilt)
    ));
}

#[test]
fn test_execute_before_build() {
    let interpreter = Interpreter::new();

    assert!(matches!(
        interpreter.execute("", false),
        Err(RuntimeError::NotBuilt)
    ));
    assert!(matches!(interpreter.structure(), Err(RuntimeError::NotBuilt)));
}

#[test]
fn test_loop_limit_must_be_positive() {
    let mut interpreter = Interpreter::new();
    assert_eq!(interpreter.loop_limit(), DEFAULT_LOOP_LIMIT);

    interpreter.set_loop_limit(500).expect("Setting limit failed");
    assert_eq!(interpreter.loop_limit(), 500);

    let result = interpreter.set_loop_limit(0);
    assert!(matches!(
        result,
        Err(RuntimeError::InvalidLoopLimit { given: 0 })
    ));
    assert_eq!(interpreter.loop_limit(), 500, "Rejected limit must not stick");
}

// === STRUCTURE DUMP ===

#[test]
fn test_structure_lists_entries() {
    let mut interpreter = Interpreter::new();
    interpreter.build(",[-]").expect("Build failed");

    let structure = interpreter.structure().expect("Structure failed");

    assert_eq!(structure, "1 | ,\n2 | Loop:\n   1 | -\n");
}

#[test]
fn test_structure_indents_nested_loops() {
    let mut interpreter = Interpreter::new();
    interpreter.build("+[>[-]<]").expect("Build failed");

    let structure = interpreter.structure().expect("Structure failed");

    assert_eq!(
        structure,
        "1 | +\n2 | Loop:\n   1 | >\n   2 | Loop:\n      1 | -\n   3 | <\n"
    );
}

// === TRACING AND REPLAY ===

#[test]
fn test_trace_records_every_step() {
    let mut interpreter = Interpreter::new();
    interpreter.build("+.").expect("Build failed");

    let (execution, log) = interpreter
        .execute_traced("", false)
        .expect("Execution failed");

    assert_eq!(execution.result, "\u{1}");
    assert_eq!(log.len(), 2);

    let first = log.get(0).expect("Missing first entry");
    assert_eq!(first.code_pos, 0);
    assert_eq!(first.action, "Increment cell");
    assert_eq!(first.note, "Added 1");
    assert_eq!(first.before.cells, vec![0]);
    assert_eq!(first.after.cells, vec![1]);
    assert!(first.emitted.is_none());
    assert!(!first.is_error);

    let second = log.get(1).expect("Missing second entry");
    assert_eq!(second.code_pos, 1);
    let emitted = second.emitted.expect("'.' must record its output");
    assert_eq!(emitted.code(), 1);
}

#[test]
fn test_trace_loop_boundaries() {
    // A skipped loop still records its entry and exit
    let mut interpreter = Interpreter::new();
    interpreter.build("[]").expect("Build failed");

    let (_, log) = interpreter
        .execute_traced("", false)
        .expect("Execution failed");

    assert_eq!(log.len(), 2);
    assert_eq!(log.get(0).expect("Missing entry").code_pos, 0);
    assert_eq!(log.get(0).expect("Missing entry").action, "Entering loop");
    assert_eq!(log.get(1).expect("Missing entry").code_pos, 1);
    assert_eq!(log.get(1).expect("Missing entry").action, "Leaving loop");
}

#[test]
fn test_trace_marks_ceiling_abort() {
    let mut interpreter = Interpreter::new();
    interpreter.build("+[+]").expect("Build failed");
    interpreter.set_loop_limit(3).expect("Setting limit failed");

    let (execution, log) = interpreter
        .execute_traced("", false)
        .expect("Execution failed");

    assert!(execution.error);
    assert!(log.had_error());

    // '+', loop entry, three body passes, then the abort marker
    assert_eq!(log.len(), 6);
    let last = log.get(log.len() - 1).expect("Missing last entry");
    assert!(last.is_error);
    assert_eq!(last.code_pos, 3, "Abort must point at the closing bracket");
    assert!(
        last.action.contains("abandoning loop"),
        "Unexpected abort action: {}",
        last.action
    );
}

#[test]
fn test_trace_input_positions_advance_past_end() {
    let mut interpreter = Interpreter::new();
    interpreter.build(",,.").expect("Build failed");

    let (_, log) = interpreter
        .execute_traced("A", false)
        .expect("Execution failed");

    assert_eq!(log.len(), 3);
    assert_eq!(log.get(0).expect("Missing entry").input_pos, 0);
    assert_eq!(log.get(1).expect("Missing entry").input_pos, 1);
    // Exhausted reads still advance, so the final marker sits past the end
    assert_eq!(log.get(2).expect("Missing entry").input_pos, 2);
}

#[test]
fn test_trace_render_shows_markers() {
    let mut interpreter = Interpreter::new();
    interpreter.build(",.").expect("Build failed");

    let (_, log) = interpreter
        .execute_traced("A", false)
        .expect("Execution failed");

    let rendered = log
        .get(1)
        .expect("Missing entry")
        .render(",.", "A", "A");

    assert!(rendered.contains("Code:"));
    assert!(rendered.contains("Input:"));
    assert!(rendered.contains("↓"));
    assert!(rendered.contains("Output so far: \"A\""));
}

#[test]
fn test_replay_cursor_walks_the_log() {
    let mut interpreter = Interpreter::new();
    interpreter.build("+-.").expect("Build failed");

    let (_, log) = interpreter
        .execute_traced("", false)
        .expect("Execution failed");

    let mut replay = log.replay();
    assert_eq!(replay.position(), 0);
    assert_eq!(replay.remaining(), 3);

    let first = replay.advance().expect("Replay ended early");
    assert_eq!(first.code_pos, 0);
    assert_eq!(replay.position(), 1);

    assert!(replay.advance().is_some());
    assert!(replay.advance().is_some());
    assert!(replay.advance().is_none(), "Replay must stop at the end");
}
