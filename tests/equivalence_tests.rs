// Cross-engine agreement tests: the tree-walking interpreter and the
// pre-assembled compiler must produce identical output, and must trip
// the loop iteration ceiling on exactly the same programs.

use braintty::compiler::Compiler;
use braintty::interpreter::engine::Interpreter;
use braintty::interpreter::errors::RuntimeError;

/// Deterministic linear congruential generator, good enough for program soup
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg(seed.wrapping_mul(2862933555777941757).wrapping_add(3037000493))
    }

    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn pick(&mut self, bound: usize) -> usize {
        (self.next() % bound as u64) as usize
    }
}

const SYMBOLS: [char; 7] = ['+', '-', '>', '<', '.', ',', '['];

/// Generate a program whose loops are all balanced and at most two deep
fn generate_program(rng: &mut Lcg) -> String {
    let length = 8 + rng.pick(24);
    let mut program = String::new();
    let mut depth = 0;

    for _ in 0..length {
        match SYMBOLS[rng.pick(SYMBOLS.len())] {
            '[' if depth < 2 => {
                program.push('[');
                depth += 1;
            }
            '[' => program.push('+'),
            c => program.push(c),
        }
        // Close a loop now and then so bodies stay short
        if depth > 0 && rng.pick(4) == 0 {
            program.push(']');
            depth -= 1;
        }
    }
    while depth > 0 {
        program.push(']');
        depth -= 1;
    }
    program
}

/// Run one program through both engines and check that they agree
fn run_both(program: &str, input: &str, limit: usize) {
    let mut interpreter = Interpreter::new();
    interpreter.build(program).expect("Interpreter build failed");
    interpreter.set_loop_limit(limit).expect("Setting limit failed");
    let execution = interpreter
        .execute_detailed(input, false)
        .expect("Interpreted execution failed");

    let mut compiler = Compiler::new();
    compiler.build(program).expect("Compiler build failed");
    compiler.set_loop_limit(limit).expect("Setting limit failed");

    match compiler.run(input) {
        Ok(output) => {
            assert!(
                !execution.error,
                "Interpreter hit the ceiling but the compiler finished on {:?}",
                program
            );
            assert_eq!(
                execution.result, output,
                "Engines disagree on {:?} with input {:?}",
                program, input
            );
        }
        Err(RuntimeError::LoopLimitExceeded { .. }) => {
            assert!(
                execution.error,
                "Compiler hit the ceiling but the interpreter finished on {:?}",
                program
            );
        }
        Err(e) => panic!("Unexpected compiled error on {:?}: {:?}", program, e),
    }
}

#[test]
fn test_engines_agree_on_fixed_programs() {
    let cases = [
        ("", ""),
        ("+", ""),
        ("[]", ""),
        ("[-]", ""),
        (",.", "A"),
        (",,.", "A"),
        (",.[.-]", "9"),
        ("++++[>++++<-]>.", ""),
        ("+[.].", ""),
        ("+[]", ""),
        ("+[+]", ""),
        (",[+.", "A"),
    ];

    for (program, input) in cases {
        run_both(program, input, 64);
    }
}

#[test]
fn test_engines_agree_on_random_programs() {
    for seed in 0..200 {
        let mut rng = Lcg::new(seed);
        let program = generate_program(&mut rng);
        let inputs = ["", "AZ", "7"];
        let input = inputs[rng.pick(inputs.len())];
        run_both(&program, input, 64);
    }
}

#[test]
fn test_default_ceilings_match() {
    let interpreter = Interpreter::new();
    let compiler = Compiler::new();

    assert_eq!(interpreter.loop_limit(), compiler.loop_limit());
}
