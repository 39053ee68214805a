//! Post-processing of the raw argument list: alias expansion, keyword/value
//! pairing, semantic type inference, and positional numbering.

use crate::types::{Argument, ArgumentType};

/// Infers a semantic type from a grammar word. Case-insensitive substring
/// match, first rule wins.
pub fn infer_type(word: &str) -> ArgumentType {
    let lower = word.to_lowercase();
    if lower.contains("file") || lower.contains("path") {
        return ArgumentType::File;
    }
    if lower.contains("dir") || lower.contains("directory") {
        return ArgumentType::Directory;
    }
    if lower.contains("user") {
        return ArgumentType::User;
    }
    if lower.contains("group") {
        return ArgumentType::Group;
    }
    if lower.contains("host") || lower.contains("hostname") {
        return ArgumentType::Hostname;
    }
    if lower.contains("string") {
        return ArgumentType::String;
    }
    if word == "ARG" {
        return ArgumentType::Default;
    }
    ArgumentType::String
}

/// Finalizes the grammar parser's raw sequence into typed, positioned
/// arguments, in original order, one at a time:
///
/// 1. `a|b|c` splits into a canonical name plus aliases.
/// 2. A dash-prefixed name is tentatively a SWITCH.
/// 3. A plain word directly after a dash-prefixed entry of the same
///    optionality is not a new argument: it is the value placeholder for
///    that keyword, so the keyword is retyped from the placeholder text
///    and keeps it as `type_name`. (`--path PATH` starts out looking like
///    a switch until PATH shows it takes a value.)
/// 4. Anything else is a positional argument with the next 1-based
///    position, typed from its own text.
pub fn finalize(raw: Vec<Argument>) -> Vec<Argument> {
    let mut args: Vec<Argument> = Vec::new();
    let mut positions = 0usize;

    for i in 0..raw.len() {
        let mut arg = raw[i].clone();
        arg.name = arg.name.trim().to_string();
        if arg.name.contains('|') {
            let mut names = arg
                .name
                .split('|')
                .map(str::to_string)
                .collect::<Vec<_>>()
                .into_iter();
            if let Some(primary) = names.next() {
                arg.name = primary;
                arg.aliases = names.collect();
            }
        }

        if arg.name.starts_with('-') {
            arg.arg_type = ArgumentType::Switch;
            args.push(arg);
        } else if i > 0
            && !raw[i - 1].name.is_empty()
            && raw[i - 1].name.starts_with('-')
            && raw[i - 1].required == arg.required
        {
            // Value placeholder for the preceding keyword argument.
            if let Some(prev) = args.last_mut() {
                prev.arg_type = infer_type(&arg.name);
                prev.type_name = arg.name;
            }
        } else {
            positions += 1;
            arg.position = Some(positions);
            arg.arg_type = infer_type(&arg.name);
            args.push(arg);
        }
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, required: bool) -> Argument {
        Argument::raw(name, required)
    }

    #[test]
    fn infer_type_covers_known_placeholders() {
        assert_eq!(infer_type("PATH"), ArgumentType::File);
        assert_eq!(infer_type("OUTPUT_FILE"), ArgumentType::File);
        assert_eq!(infer_type("DIR"), ArgumentType::Directory);
        assert_eq!(infer_type("DIRECTORY"), ArgumentType::Directory);
        assert_eq!(infer_type("USER"), ArgumentType::User);
        assert_eq!(infer_type("GROUP"), ArgumentType::Group);
        assert_eq!(infer_type("HOST"), ArgumentType::Hostname);
        assert_eq!(infer_type("HOSTNAME"), ArgumentType::Hostname);
        assert_eq!(infer_type("STRING"), ArgumentType::String);
        assert_eq!(infer_type("ARG"), ArgumentType::Default);
        assert_eq!(infer_type("name"), ArgumentType::String);
    }

    #[test]
    fn file_beats_directory_when_both_match() {
        // "path" matches before "dir" does; first rule wins.
        assert_eq!(infer_type("DIR_PATH"), ArgumentType::File);
    }

    #[test]
    fn lone_dashed_name_stays_a_switch() {
        let out = finalize(vec![raw("--force", true)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].arg_type, ArgumentType::Switch);
        assert_eq!(out[0].position, None);
    }

    #[test]
    fn type_word_reclassifies_preceding_keyword() {
        let out = finalize(vec![raw("--path", true), raw("PATH", true)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "--path");
        assert_eq!(out[0].arg_type, ArgumentType::File);
        assert_eq!(out[0].type_name, "PATH");
    }

    #[test]
    fn type_word_outside_bracket_group_is_positional() {
        // [--verbose] target: differing optionality keeps target positional.
        let out = finalize(vec![raw("--verbose", false), raw("target", true)]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].arg_type, ArgumentType::Switch);
        assert_eq!(out[1].position, Some(1));
    }

    #[test]
    fn positions_count_positionals_only() {
        let out = finalize(vec![
            raw("--count", true),
            raw("NUM", true),
            raw("src", true),
            raw("dst", true),
        ]);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].position, None);
        assert_eq!(out[1].position, Some(1));
        assert_eq!(out[2].position, Some(2));
    }

    #[test]
    fn aliases_split_from_pipe_names() {
        let out = finalize(vec![raw("--path|-p|--file", true), raw("PATH", true)]);
        assert_eq!(out[0].name, "--path");
        assert_eq!(out[0].aliases, vec!["-p".to_string(), "--file".to_string()]);
        assert_eq!(out[0].type_name, "PATH");
    }
}
