/// Options for one invocation, produced by the argument interpreter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Print the alt text and its attribution on a single line.
    pub one_line: bool,
    /// How many strips back from the newest to select; 0 is the newest.
    pub previous: u32,
    /// Ask the transport to log what it is doing.
    pub verbose: bool,
    /// Skip verification of the server's certificate.
    pub insecure: bool,
}

impl Options {
    pub fn with_one_line(mut self, one_line: bool) -> Self {
        self.one_line = one_line;
        self
    }

    pub fn with_previous(mut self, previous: u32) -> Self {
        self.previous = previous;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }
}
