//! The documentation pages.
//!
//! Each page is static prose plus calls into [`Links`]. Bodies are plain
//! function pointers so the page table can be a `static` and shared across
//! render threads. Prose without links is written as Markdown; paragraphs
//! that carry links are written with `html!` so the anchors stay typed.
//!
//! | Slug | Title | Sections |
//! |------|-------|----------|
//! | `index` | Home | `news`, `known-bugs`, `limitations` |
//! | `download` | Download | `binaries`, `cvs` |
//! | `faq` | FAQ | `decompiler`, `obfuscator` |

use crate::links::{LinkError, Links};
use crate::shell::markdown;
use crate::types::NavEntry;
use maud::{Markup, html};

/// Renders a page body. The shell supplies the header and footer.
pub type PageBody = fn(&Links<'_>) -> Result<Markup, LinkError>;

/// A page: identity, declared sections, and body.
#[derive(Clone, Copy)]
pub struct Page {
    pub slug: &'static str,
    pub title: &'static str,
    /// Section ids this page defines with `id` attributes.
    pub sections: &'static [&'static str],
    pub body: PageBody,
}

impl Page {
    pub fn nav_entry(&self) -> NavEntry {
        NavEntry {
            slug: self.slug.to_string(),
            title: self.title.to_string(),
        }
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("slug", &self.slug)
            .field("title", &self.title)
            .field("sections", &self.sections)
            .finish_non_exhaustive()
    }
}

static PAGES: [Page; 3] = [
    Page {
        slug: "index",
        title: "Home",
        sections: &["news", "known-bugs", "limitations"],
        body: index,
    },
    Page {
        slug: "download",
        title: "Download",
        sections: &["binaries", "cvs"],
        body: download,
    },
    Page {
        slug: "faq",
        title: "FAQ",
        sections: &["decompiler", "obfuscator"],
        body: faq,
    },
];

/// The built-in pages, in navigation order.
pub fn builtin() -> &'static [Page] {
    &PAGES
}

/// Look a page up by slug.
pub fn find<'a>(pages: &'a [Page], slug: &str) -> Option<&'a Page> {
    pages.iter().find(|p| p.slug == slug)
}

// ============================================================================
// Page bodies
// ============================================================================

fn index(links: &Links<'_>) -> Result<Markup, LinkError> {
    let license = links.internal_anchor_link("license")?;
    let applet = links.internal_anchor_link("applet")?;
    let name = links.project().name.to_uppercase();

    Ok(html! {
        p {
            i { (name) } " is a java package containing a decompiler and an optimizer for java. "
            "This package is " (license.wrap("freely available")) " under the GNU GPL. "
            b { "New:" } " The bytecode package and the core decompiler is now under "
            "GNU Lesser General Public License, so you can integrate it in your project."
        }
        p {
            "The decompiler reads in " tt { "class" } " files and produces something similar "
            "to the original " tt { "java" } " file. Of course this can't be perfect: there is "
            "no way to produce the comments or the names of local variables (except when "
            "compiled with debugging) and there are often more ways to write the same thing. "
            "However, " i { (name) } " does its job quite well, so you should give it a try and "
            (applet.wrap("start the applet")) ". It has support for all constructs of JDK 1.3 "
            "including inner and anonymous classes."
        }
        (markdown(OPTIMIZER))
        h2 #news { "News" }
        ul {
            li {
                i { (name) } " " (links.project().version)
                " is out, with support for javac v8 (JDK 1.3)."
            }
            li { "The license changed to LGPL for the bytecode interface and decompiler." }
        }
        h2 #known-bugs { "Known bugs of the decompiler" }
        (markdown(KNOWN_BUGS))
        h2 #limitations { "Limitations" }
        (markdown(LIMITATIONS))
    })
}

const OPTIMIZER: &str = "\
The optimizer transforms `class` files in various ways which can be
controlled by a script file. It supports the following operations:

- Renaming class, method, field and local names to shorter, obfuscated, or
  unique names or according to a given translation table
- Removing debugging information
- Removing dead code (classes, fields, methods) and constant fields
- Optimizing local variable allocation
";

const KNOWN_BUGS: &str = "\
Some JDK 1.3 synthetic access functions aren't understood. The produced
source contains `access$xxx` functions, but it still compiles.

There may be other bugs that cause exceptions or invalid code. If you have
such a problem don't hesitate to file a bug report. Please include the
`class` file if possible.
";

const LIMITATIONS: &str = "\
If not all dependent classes can be found, the verifier (which is run before
decompilation starts) may exit with a type error. You can decompile it with
`--verify=off`, but take the warning seriously: types may be incorrect.
There is sometimes no way to guess the right type if you don't have access to
the full class hierarchy.

This is not a bug in the verifier: java will complain the same way if it is
run with bytecode verification turned on. And if you don't have the
dependent classes, you can't compile the code again.

There may be situations where the code doesn't understand complex
expressions. In this case many ugly temporary variables are used, but the
code should still be compilable. This especially happens when you compile
with the `-O` flag and javac has inlined some methods.
";

fn download(links: &Links<'_>) -> Result<Markup, LinkError> {
    let project = links.project();
    let releases = links.external_project_link("files/")?;
    let links_page = links.internal_anchor_link("links")?;
    let cvs = links.external_project_link("cvs/")?;
    let jdk11 = links.versioned_archive_link("-1.1")?;
    let jdk12 = links.versioned_archive_link("-1.2")?;
    let name = project.name.to_uppercase();

    Ok(html! {
        h1 { "Download" }
        p {
            "Click " (releases.wrap("here")) " to download the latest released source code of "
            i { (name) } ". You need several other packages to build " i { (name) } ", check the "
            (links_page.wrap("links page")) "."
        }
        h2 #binaries { "Precompiled archives" }
        p {
            "The simplest way to get it, especially for non unix users, is in precompiled "
            "form, though. There are two archives at the "
            a href=(project.archive_base()) { "ftp server" }
            ". You may need to press shift while clicking on the link, depending on your browser."
        }
        ul {
            li {
                (jdk11) " is for JDK\u{a0}1.1. It contains the collection classes from the GNU "
                "Classpath project. If you want to use the swing interface, you have to "
                "download swing separately."
            }
            li { (jdk12) " is for JDK\u{a0}1.2 or better." }
        }
        h2 #cvs { "CVS Repository" }
        p {
            "You can get the latest sources from the " (cvs.wrap("CVS repository")) ". "
            "They may not always compile, though. If you want an older version you can use "
            "the " code { "-r" } " option:"
        }
        ul {
            li { code { "-r jode_1_0_93" } ": gives you the version 1.0.93" }
            li { code { "-r branch_1_1" } ": gives you the latest version of the 1.1 series" }
        }
        (markdown(BUILD_FROM_CVS))
    })
}

const BUILD_FROM_CVS: &str = "\
To build the sources from CVS change to the main directory where the
`configure.in` file resides and run

```
aclocal && automake -a && autoconf
```

Afterwards follow the instructions in the `INSTALL` file.
";

fn faq(links: &Links<'_>) -> Result<Markup, LinkError> {
    let decompiler = links.internal_anchor_link("decompiler")?;
    let obfuscator = links.internal_anchor_link("obfuscator")?;

    Ok(html! {
        h1 { "FAQ - Frequently Asked Questions" }
        p { "This is a list of some questions that pop up from time to time." }
        ul {
            li { (decompiler.wrap("Decompiler issues")) }
            li { (obfuscator.wrap("Obfuscator issues")) }
        }
        h2 #decompiler { "Decompiler issues" }
        (markdown(FAQ_DECOMPILER))
        h2 #obfuscator { "Obfuscator issues" }
        (markdown(FAQ_OBFUSCATOR))
    })
}

const FAQ_DECOMPILER: &str = "\
### The decompiler crashes with a VerifyException, what can I do?

The class isn't verifiable, probably because there is not enough information
about used classes. See the question about the classpath.

This could also be caused by malicious bytecode, or because there is a bug in
the verifier.

### What should be included in the classpath?

The decompiler needs to know the full class hierarchy to guess the types.
This includes not only the classes in the program, but also the libraries
used by the java program, even the Java runtime library. You should set the
classpath to include all these classes.

If you don't specify the classpath on the command line, the same one as your
Java Virtual Machine is used.

As a last resort, if a class can't be found in the classpath, reflection is
used to ask the Virtual Machine. This works quite well, but loading classes
can have side effects, e.g. when AWT classes are loaded, an AWT thread is
created even though the decompiler doesn't need it.

### Why doesn't it decompile my inner class `MyClass$Inner.class`?

You should decompile the outermost class (`MyClass` in this case). The
produced code contains the inner class.
";

const FAQ_OBFUSCATOR: &str = "\
### What should be included in the classpath?

The program, all libraries, the Java runtime library. Don't omit a library
even when you don't want to obfuscate it.

### What should I preserve?

The most common mistake is to preserve a class. In most cases this is not
what you want. This only makes sure the class won't be renamed, it doesn't
prevent it from being stripped. Instead you should preserve methods and
constructors. The constructor is just a method with the special name
`<init>`.

Another common mistake is to omit the type signature, e.g. to preserve
`Class.main` instead of `Class.main.([Ljava/lang/String;)V`. That doesn't
work. If you don't want to care about the format of the type signature use a
wildcard as in `Class.main.*`.

### What is a type signature?

The type signature is a machine readable representation of a java type that
is used all over in java bytecode. The JDK ships a command named `javap`.
With `javap -s` you can list the fields and methods of a class with their
type signatures.

If you are interested in the format of type signatures read the Java Virtual
Machine Specification, Chapter 4.3 Descriptors.
";
