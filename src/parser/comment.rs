pub const COMMENT_MARKER: char = '#';


/// Strip line comments: everything from a `#` up to (not including) the next newline.
/// Line breaks always survive, so statement line structure is preserved.
pub fn without_comments(sql: &str) -> String {
    let mut output = String::with_capacity(sql.len());
    let mut omit = false;

    for c in sql.chars() {
        match c {
            '\n' => {
                omit = false;
                output.push(c);
            }
            COMMENT_MARKER => omit = true,
            _ if omit => {}
            _ => output.push(c),
        }
    }

    output
}


#[cfg(test)]
mod tests {
    use super::without_comments;

    #[test]
    fn strips_until_end_of_line() {
        assert_eq!(without_comments("a #comment\nb"), "a \nb");
    }

    #[test]
    fn text_without_marker_is_unchanged() {
        let cases = ["", "select 1;", "  create table t (x);\n\n", "\n"];
        for sql in cases {
            assert_eq!(without_comments(sql), sql);
        }
    }

    #[test]
    fn comment_at_end_of_input() {
        assert_eq!(without_comments("select 1; # trailing"), "select 1; ");
        assert_eq!(without_comments("#"), "");
    }

    #[test]
    fn newlines_are_kept_inside_comment_runs() {
        assert_eq!(without_comments("# one\n# two\n"), "\n\n");
        assert_eq!(without_comments("x # a # b\r\ny"), "x \ny");
    }

    #[test]
    fn filters_a_full_migration() {
        let sql = concat!(
            "\n",
            "\t# test comment!!! :D\n",
            "\tcreate table test (\n",
            "\t\tthing, #esd8yr9fy8s90dfy\n",
            "\t\tother_thing # !!!!!!!!11111\n",
            "\t\t#apple\n",
            "\t);\n",
            "\t# test #\n",
            "\tcreate table ice_cream (\n",
            "\t\tflavor\n",
            "\t);\n",
        );
        let expected = concat!(
            "\n",
            "\t\n",
            "\tcreate table test (\n",
            "\t\tthing, \n",
            "\t\tother_thing \n",
            "\t\t\n",
            "\t);\n",
            "\t\n",
            "\tcreate table ice_cream (\n",
            "\t\tflavor\n",
            "\t);\n",
        );
        assert_eq!(without_comments(sql), expected);
    }
}
