use std::io;

use verysimple16::{LoadError, Machine, DEFAULT_CYCLES};

fn trace(source: &str, cycles: u32) -> String {
    let mut machine = Machine::new();
    machine.load_program(source).expect("program should load");
    let mut out = Vec::new();
    machine.run(cycles, &mut out).expect("run should succeed");
    String::from_utf8(out).expect("trace is ASCII")
}

#[test]
fn load_scenario_from_the_reference_trace() {
    // LOAD operand=1, then the literal 2 sitting at address 1 as data.
    let source = "0000000000000001\n0000000000000010\n";
    let mut machine = Machine::new();
    machine.load_program(source).unwrap();
    machine.run(1, &mut io::sink()).unwrap();
    assert_eq!(machine.registers()[0], machine.memory().read(1));
    assert_eq!(machine.registers()[0], 2);
    assert_eq!(machine.pc(), 1);
    assert!(!machine.carry_flag());
}

#[test]
fn identical_programs_produce_identical_traces() {
    // ADD a wrapping cell to itself repeatedly; exercises carry both ways.
    let source = "0100000000000011\n0011000000000001\n0010000000000000\n1111111111111111\n";
    assert_eq!(trace(source, DEFAULT_CYCLES), trace(source, DEFAULT_CYCLES));
}

#[test]
fn trace_records_the_default_twenty_cycles() {
    let output = trace("0000000000000000\n", DEFAULT_CYCLES);
    assert_eq!(output.lines().count(), 20);
    assert!(output.starts_with("Cycle 1: "));
    assert!(output.lines().last().unwrap().starts_with("Cycle 20: "));
}

#[test]
fn trace_shows_post_jump_pc_and_raw_instruction_word() {
    // JNC 5 taken on a clear carry flag.
    let output = trace("0010000000000101\n", 1);
    assert_eq!(
        output,
        "Cycle 1: PC=5, Reg=[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], Carry=0, Instruction=2005\n",
    );
}

#[test]
fn add_overflow_is_visible_in_the_trace() {
    // 0: LOAD 3; 1: ADD 4; memory[3] = 0xffff, memory[4] = 1.
    let source = "0000000000000011\n0100000000000100\n0000000000000000\n1111111111111111\n0000000000000001\n";
    let output = trace(source, 2);
    let second = output.lines().nth(1).unwrap();
    assert_eq!(
        second,
        "Cycle 2: PC=1, Reg=[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], Carry=1, Instruction=4004",
    );
}

#[test]
fn malformed_program_fails_before_any_cycle() {
    let mut machine = Machine::new();
    let err = machine.load_program("12\n").unwrap_err();
    assert!(matches!(err, LoadError::Format { line: 1, .. }));
    assert_eq!(machine.pc(), 0);
    assert_eq!(machine.memory().read(0), 0);
}
