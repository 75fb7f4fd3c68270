/// Capacities of the interpreter's bounded stacks. Overflowing any of
/// them is an OUT OF MEMORY error naming the stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Nested GOSUB calls.
    pub gosub_depth: usize,
    /// Active FOR loops.
    pub for_depth: usize,
    /// Operand stack of the expression evaluator.
    pub stack_depth: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            gosub_depth: 10,
            for_depth: 4,
            stack_depth: 256,
        }
    }
}
