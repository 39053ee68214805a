//! Emits the interactive completion engine and models its state machine.
//!
//! The replay logic exists twice by design: once as the Rust automaton
//! below, which the tests drive directly, and once as the bash helper the
//! artifact ships. Both walk the typed words left to right with the same
//! transitions, so the Rust model is the reference for the emitted code.

use crate::config::GenConfig;
use crate::emit::ScriptBuilder;
use crate::types::{local_name, ArgumentType, Function, Module};

/// The current expectation while replaying an invocation's words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionState {
    /// The next word may be a flag name or a positional value.
    ExpectArg,
    /// The previous word was a keyword; the next word is its value.
    ExpectValue(ArgumentType),
    /// Terminal fallback after a literal `--`; nothing advances past it.
    Idk,
}

/// What to offer at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    /// Switch and keyword names (with aliases).
    pub names: Vec<String>,
    /// Typed value source to draw from, if any.
    pub value_type: Option<ArgumentType>,
    /// Whether generic filesystem entries are offered as a fallback.
    pub generic_paths: bool,
}

/// Per-function completion tables, flattened from the argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCompletion {
    pub switches: Vec<String>,
    pub keywords: Vec<(String, ArgumentType)>,
    pub positional_types: Vec<ArgumentType>,
}

impl FunctionCompletion {
    pub fn from_function(function: &Function) -> Self {
        let mut switches = Vec::new();
        let mut keywords = Vec::new();
        let mut positional_types = Vec::new();
        for arg in &function.args {
            if arg.position.is_some() {
                positional_types.push(arg.arg_type);
            } else if arg.arg_type == ArgumentType::Switch {
                switches.push(arg.name.clone());
                switches.extend(arg.aliases.iter().cloned());
            } else {
                keywords.push((arg.name.clone(), arg.arg_type));
                for alias in &arg.aliases {
                    keywords.push((alias.clone(), arg.arg_type));
                }
            }
        }
        Self {
            switches,
            keywords,
            positional_types,
        }
    }

    fn keyword_type(&self, word: &str) -> Option<ArgumentType> {
        self.keywords
            .iter()
            .find(|(name, _)| name == word)
            .map(|(_, t)| *t)
    }

    /// Replays already-typed words (module/function selectors excluded)
    /// and returns the state at the cursor plus the count of consumed
    /// positional slots. Variadic positionals are not modeled past `Idk`.
    pub fn replay(&self, words: &[&str]) -> (CompletionState, usize) {
        let mut state = CompletionState::ExpectArg;
        let mut position = 0usize;
        for word in words {
            match state {
                CompletionState::ExpectArg => {
                    if *word == "--" {
                        state = CompletionState::Idk;
                    } else if let Some(value_type) = self.keyword_type(word) {
                        state = CompletionState::ExpectValue(value_type);
                    } else if self.switches.iter().any(|s| s == word) {
                        // Stay put; switches take no value.
                    } else if !word.starts_with('-') {
                        position += 1;
                    }
                    // Unrecognized dash words are noise; stay in ExpectArg.
                }
                CompletionState::ExpectValue(_) => {
                    state = CompletionState::ExpectArg;
                }
                CompletionState::Idk => break,
            }
        }
        (state, position)
    }

    /// Suggestion production at the cursor for a given replayed state.
    pub fn suggest(&self, state: CompletionState, position: usize) -> Suggestions {
        let names = || {
            let mut names: Vec<String> = self.switches.clone();
            names.extend(self.keywords.iter().map(|(n, _)| n.clone()));
            names
        };
        match state {
            CompletionState::ExpectArg => Suggestions {
                names: names(),
                value_type: self.positional_types.get(position).copied(),
                generic_paths: false,
            },
            CompletionState::ExpectValue(value_type) => Suggestions {
                names: Vec::new(),
                value_type: Some(value_type),
                generic_paths: false,
            },
            CompletionState::Idk => Suggestions {
                names: names(),
                value_type: None,
                generic_paths: true,
            },
        }
    }

    fn switches_str(&self) -> String {
        self.switches.join(" ")
    }

    fn keywords_str(&self) -> String {
        self.keywords
            .iter()
            .map(|(n, _)| n.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn keyword_types_str(&self) -> String {
        self.keywords
            .iter()
            .map(|(n, t)| format!("{n}:{}", t.label()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn positional_types_str(&self) -> String {
        self.positional_types
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Emits the two shared completion helpers.
fn emit_helpers(out: &mut ScriptBuilder, prefix: &str) {
    out.line("# Complete a value based on its type.");
    out.line(format!("# Usage: {prefix}_complete_type TYPE CUR"));
    out.block(format!("function {prefix}_complete_type() {{"), "}", |out| {
        out.line("local type=\"$1\" cur=\"$2\"");
        out.block("case \"${type}\" in", "esac", |out| {
            out.line("FILE)");
            out.indent();
            out.line("COMPREPLY+=($(compgen -A file -- \"${cur}\"))");
            out.line(";;");
            out.dedent();
            out.line("DIRECTORY)");
            out.indent();
            out.line("COMPREPLY+=($(compgen -A directory -- \"${cur}\"))");
            out.line(";;");
            out.dedent();
            out.line("USER)");
            out.indent();
            out.line("COMPREPLY+=($(compgen -A user -- \"${cur}\"))");
            out.line(";;");
            out.dedent();
            out.line("GROUP)");
            out.indent();
            out.line("COMPREPLY+=($(compgen -A group -- \"${cur}\"))");
            out.line(";;");
            out.dedent();
            out.line("HOSTNAME)");
            out.indent();
            out.line("COMPREPLY+=($(compgen -A hostname -- \"${cur}\"))");
            out.block("if [[ -f ~/.ssh/config ]]; then", "fi", |out| {
                // Host entries from the client SSH config, wildcards excluded.
                out.line(
                    "COMPREPLY+=($(compgen -W \"$(grep -i '^Host ' ~/.ssh/config 2>/dev/null \
                     | awk '{print $2}' | grep -v '[*?]')\" -- \"${cur}\"))",
                );
            });
            out.line(";;");
            out.dedent();
            out.line("STRING|DEFAULT)");
            out.indent();
            out.line(";;");
            out.dedent();
            out.line("*)");
            out.indent();
            out.line("COMPREPLY+=($(compgen -A file -- \"${cur}\"))");
            out.line(";;");
            out.dedent();
        });
    });
    out.blank();

    out.line("# Complete function arguments by walking COMP_WORDS to determine state.");
    out.line("#");
    out.line("# EXPECT_ARG suggests flag names, plus values for the positional at the");
    out.line("# current slot when one exists. EXPECT_VALUE_<TYPE> suggests values of");
    out.line("# that type only. IDK (after a literal --) falls back to flag names and");
    out.line("# generic paths.");
    out.line("#");
    out.line(format!(
        "# Usage: {prefix}_complete_func SWITCHES KEYWORDS KEYWORD_TYPES POSITIONAL_TYPES"
    ));
    out.block(format!("function {prefix}_complete_func() {{"), "}", |out| {
        out.line(
            "local switches=\"$1\" keywords=\"$2\" keyword_types=\"$3\" positional_types_str=\"$4\"",
        );
        out.line("local cur=\"${COMP_WORDS[COMP_CWORD]}\"");
        out.line("local i=3 pos=0 state=EXPECT_ARG");
        out.line("local -a positional_types=(${positional_types_str})");
        out.blank();
        out.block(
            "while [[ \"${i}\" -lt \"${COMP_CWORD}\" ]]; do",
            "done",
            |out| {
                out.line("local word=\"${COMP_WORDS[i]}\"");
                out.block("case \"${state}\" in", "esac", |out| {
                    out.line("EXPECT_ARG)");
                    out.indent();
                    out.block("if [[ \"${word}\" == \"--\" ]]; then", "fi", |out| {
                        out.line("state=IDK");
                        out.dedent();
                        out.line("elif [[ \" ${keywords} \" == *\" ${word} \"* ]]; then");
                        out.indent();
                        out.line("local ktype");
                        out.block("for pair in ${keyword_types}; do", "done", |out| {
                            out.block(
                                "if [[ \"${pair%%:*}\" == \"${word}\" ]]; then",
                                "fi",
                                |out| {
                                    out.line("ktype=\"${pair#*:}\"");
                                    out.line("break");
                                },
                            );
                        });
                        out.line("state=\"EXPECT_VALUE_${ktype:-STRING}\"");
                        out.dedent();
                        out.line("elif [[ \" ${switches} \" == *\" ${word} \"* ]]; then");
                        out.indent();
                        out.line("state=EXPECT_ARG");
                        out.dedent();
                        out.line("elif [[ \"${word}\" != -* ]]; then");
                        out.indent();
                        out.line("(( pos++ ))");
                        out.line("state=EXPECT_ARG");
                        out.dedent();
                        out.line("else");
                        out.indent();
                        out.line("state=EXPECT_ARG");
                    });
                    out.line(";;");
                    out.dedent();
                    out.line("EXPECT_VALUE_*)");
                    out.indent();
                    out.line("state=EXPECT_ARG");
                    out.line(";;");
                    out.dedent();
                    out.line("IDK)");
                    out.indent();
                    out.line("break");
                    out.line(";;");
                    out.dedent();
                });
                out.line("(( i++ ))");
            },
        );
        out.blank();
        out.line("COMPREPLY=()");
        out.block("case \"${state}\" in", "esac", |out| {
            out.line("EXPECT_ARG)");
            out.indent();
            out.line("COMPREPLY+=($(compgen -W \"${switches} ${keywords}\" -- \"${cur}\"))");
            out.block(
                "if [[ -n \"${positional_types[$pos]}\" ]]; then",
                "fi",
                |out| {
                    out.line(format!(
                        "{prefix}_complete_type \"${{positional_types[$pos]}}\" \"${{cur}}\""
                    ));
                },
            );
            out.line(";;");
            out.dedent();
            out.line("EXPECT_VALUE_*)");
            out.indent();
            out.line(format!(
                "{prefix}_complete_type \"${{state#EXPECT_VALUE_}}\" \"${{cur}}\""
            ));
            out.line(";;");
            out.dedent();
            out.line("IDK)");
            out.indent();
            out.line("COMPREPLY+=($(compgen -W \"${switches} ${keywords}\" -- \"${cur}\"))");
            out.line("COMPREPLY+=($(compgen -A file -- \"${cur}\"))");
            out.line(";;");
            out.dedent();
        });
    });
    out.blank();
}

pub fn emit_complete(out: &mut ScriptBuilder, modules: &[Module], cfg: &GenConfig) {
    let prefix = cfg.prefix();
    emit_helpers(out, &prefix);

    out.block(format!("function {prefix}_compgen() {{"), "}", |out| {
        let module_names = modules
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        out.line(format!("local modules=\"{module_names}\""));
        out.block("case \"${COMP_CWORD}\" in", "esac", |out| {
            // First argument is a module.
            out.line("1)");
            out.indent();
            out.line(
                "COMPREPLY=($(compgen -W \"help ${modules}\" -- ${COMP_WORDS[COMP_CWORD]}))",
            );
            out.line("return 0");
            out.line(";;");
            out.dedent();

            // Second argument is a function in that module.
            out.line("2)");
            out.indent();
            out.block("case \"${COMP_WORDS[1]}\" in", "esac", |out| {
                for module in modules {
                    let names = module
                        .public_functions()
                        .map(|f| f.local_name(&module.name))
                        .collect::<Vec<_>>()
                        .join(" ");
                    out.line(format!("{})", module.name));
                    out.indent();
                    out.line(format!(
                        "COMPREPLY=($(compgen -W \"help {names}\" -- ${{COMP_WORDS[COMP_CWORD]}}))"
                    ));
                    out.line("return 0");
                    out.line(";;");
                    out.dedent();
                }
            });
            out.line(";;");
            out.dedent();

            // Remaining arguments delegate to the per-function walker.
            out.line("*)");
            out.indent();
            out.block("case \"${COMP_WORDS[1]}\" in", "esac", |out| {
                for module in modules {
                    if module.public_functions().next().is_none() {
                        continue;
                    }
                    out.line(format!("{})", module.name));
                    out.indent();
                    out.block("case \"${COMP_WORDS[2]}\" in", "esac", |out| {
                        for function in module.public_functions() {
                            let tables = FunctionCompletion::from_function(function);
                            out.line(format!(
                                "{})",
                                local_name(&function.name.value, &module.name)
                            ));
                            out.indent();
                            out.line(format!(
                                "{prefix}_complete_func \"{}\" \"{}\" \"{}\" \"{}\"",
                                tables.switches_str(),
                                tables.keywords_str(),
                                tables.keyword_types_str(),
                                tables.positional_types_str(),
                            ));
                            out.line(";;");
                            out.dedent();
                        }
                    });
                    out.line(";;");
                    out.dedent();
                }
            });
            out.line(";;");
            out.dedent();
        });
    });
    out.blank();
    out.line(format!("complete -F {prefix}_compgen {}", cfg.command));
}
