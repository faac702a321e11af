use ls8::compiler::{compiler, loader};
use ls8::computer::registers::STACK_TOP;
use ls8::computer::{Computer, RunError};

fn run(image: &[u8]) -> (Computer, Vec<u8>) {
    let mut computer = Computer::new();
    computer.load(image).unwrap();
    let mut output = Vec::new();
    computer.run(&mut output).unwrap();
    (computer, output)
}

#[test]
fn print8() {
    let (_, output) = run(&loader::load(include_str!("../programs/print8.ls8")));
    assert_eq!(output, vec![8]);
}

#[test]
fn mult() {
    let (_, output) = run(&loader::load(include_str!("../programs/mult.ls8")));
    assert_eq!(output, vec![72]);
}

#[test]
fn stack() {
    let (computer, output) = run(&loader::load(include_str!("../programs/stack.ls8")));
    assert_eq!(output, vec![2, 1]);
    assert_eq!(computer.registers().stack_pointer(), STACK_TOP);
}

#[test]
fn call() {
    let (computer, output) = run(&loader::load(include_str!("../programs/call.ls8")));
    assert_eq!(output, vec![20, 30, 36, 60]);
    assert_eq!(computer.registers().stack_pointer(), STACK_TOP);
    // The zero byte after the final RET names R0, which receives the return
    // address of the last call (the HLT at 23).
    assert_eq!(computer.register(0).unwrap(), 23);
}

#[test]
fn assembled_call_matches_binary_listing() {
    let assembled = compiler::compile(include_str!("../programs/call.asm")).unwrap();
    let listed = loader::load(include_str!("../programs/call.ls8"));
    assert_eq!(assembled, listed);
}

#[test]
fn compare_flag_is_never_cleared() {
    let image = compiler::compile(include_str!("../programs/compare.asm")).unwrap();
    let (computer, output) = run(&image);
    assert_eq!(output, vec![1, 3, 4]);
    assert!(computer.flag());
}

#[test]
fn unknown_instruction_aborts_with_its_location() {
    // LDI R0,8; PRN R0; 0b11111111; PRN R0
    let mut computer = Computer::new();
    computer.load(&[0x82, 0, 8, 0x47, 0, 0xFF, 0x47, 0]).unwrap();
    let mut output = Vec::new();

    let err = computer.run(&mut output).unwrap_err();

    assert!(matches!(
        err,
        RunError::UnknownInstruction { opcode: 0xFF, pc: 5 }
    ));
    assert_eq!(err.to_string(), "unknown instruction 0b11111111 at 0x05");
    assert_eq!(output, vec![8]);
    assert!(!computer.is_running());
}

#[test]
fn balanced_calls_return_past_the_call() {
    for target in [0x20u8, 0x80, 0xE0] {
        // LDI R1,target; CALL R1; PRN R2; HLT  / at target: LDI R2,target; RET; (R3)
        let mut image = vec![0u8; target as usize + 6];
        image[..8].copy_from_slice(&[0x82, 1, target, 0x50, 1, 0x47, 2, 0x01]);
        let t = target as usize;
        image[t..t + 5].copy_from_slice(&[0x82, 2, target, 0x11, 3]);

        let (computer, output) = run(&image);
        assert_eq!(output, vec![target]);
        assert_eq!(computer.register(3).unwrap(), 5);
        assert_eq!(computer.program_counter(), 7);
    }
}
