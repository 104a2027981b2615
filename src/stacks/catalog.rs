//! The stack catalog.

use crate::stacks::custom;
use crate::stacks::descriptor::{Category, Generator, PostInstallStep, StackDescriptor};

const NODE: &[&str] = &["node", "npm"];
const PYTHON: &[&str] = &["python3"];
const GO: &[&str] = &["go"];
const RUST: &[&str] = &["cargo"];
const RAILS: &[&str] = &["ruby", "rails"];

const VITE_NEXT_STEPS: &[&str] = &["cd {name}", "npm install", "npm run dev"];
const NODE_API_NEXT_STEPS: &[&str] = &["cd {name}", "npm install", "npm run dev"];
const GO_API_NEXT_STEPS: &[&str] = &["cd {name}", "go mod tidy", "go run main.go"];
const RUST_API_NEXT_STEPS: &[&str] = &["cd {name}", "cargo run"];
const PYTHON_VENV_NEXT_STEPS: &[&str] = &[
    "cd {name}",
    "python3 -m venv venv",
    "source venv/bin/activate",
    "pip install -r requirements.txt",
];

const DJANGO_REQUIREMENTS: &[PostInstallStep] = &[PostInstallStep::WriteFile {
    path: "requirements.txt",
    contents: "Django>=5.0\n",
}];

const EXPRESS_ENV_EXAMPLE: &[PostInstallStep] = &[PostInstallStep::WriteFile {
    path: ".env.example",
    contents: "PORT=3000\n",
}];

/// Every supported stack, grouped by category in menu order.
pub static STACKS: &[StackDescriptor] = &[
    // Frontend
    StackDescriptor {
        id: "react-vite",
        display_name: "React (Vite)",
        category: Category::Frontend,
        language: "javascript",
        generator: Generator::Command("npm create vite@latest {name}"),
        requires: NODE,
        interactive: true,
        post_install: &[],
        next_steps: VITE_NEXT_STEPS,
    },
    StackDescriptor {
        id: "react-vite-ts",
        display_name: "React + TypeScript (Vite)",
        category: Category::Frontend,
        language: "typescript",
        generator: Generator::Command("npm create vite@latest {name} -- --template react-ts"),
        requires: NODE,
        interactive: true,
        post_install: &[],
        next_steps: VITE_NEXT_STEPS,
    },
    StackDescriptor {
        id: "nextjs",
        display_name: "Next.js",
        category: Category::Frontend,
        language: "javascript",
        generator: Generator::Command("npx create-next-app@latest {name}"),
        requires: NODE,
        interactive: true,
        post_install: &[],
        next_steps: &["cd {name}", "npm run dev"],
    },
    StackDescriptor {
        id: "vue-vite",
        display_name: "Vue (Vite)",
        category: Category::Frontend,
        language: "javascript",
        generator: Generator::Command("npm create vite@latest {name} -- --template vue"),
        requires: NODE,
        interactive: true,
        post_install: &[],
        next_steps: VITE_NEXT_STEPS,
    },
    StackDescriptor {
        id: "vue-vite-ts",
        display_name: "Vue + TypeScript (Vite)",
        category: Category::Frontend,
        language: "typescript",
        generator: Generator::Command("npm create vite@latest {name} -- --template vue-ts"),
        requires: NODE,
        interactive: true,
        post_install: &[],
        next_steps: VITE_NEXT_STEPS,
    },
    StackDescriptor {
        id: "svelte",
        display_name: "Svelte (Vite)",
        category: Category::Frontend,
        language: "javascript",
        generator: Generator::Command("npm create vite@latest {name} -- --template svelte"),
        requires: NODE,
        interactive: true,
        post_install: &[],
        next_steps: VITE_NEXT_STEPS,
    },
    StackDescriptor {
        id: "svelte-ts",
        display_name: "Svelte + TypeScript (Vite)",
        category: Category::Frontend,
        language: "typescript",
        generator: Generator::Command("npm create vite@latest {name} -- --template svelte-ts"),
        requires: NODE,
        interactive: true,
        post_install: &[],
        next_steps: VITE_NEXT_STEPS,
    },
    StackDescriptor {
        id: "solidjs",
        display_name: "Solid.js (Vite)",
        category: Category::Frontend,
        language: "javascript",
        generator: Generator::Command("npm create vite@latest {name} -- --template solid"),
        requires: NODE,
        interactive: true,
        post_install: &[],
        next_steps: VITE_NEXT_STEPS,
    },
    StackDescriptor {
        id: "solidjs-ts",
        display_name: "Solid.js + TypeScript (Vite)",
        category: Category::Frontend,
        language: "typescript",
        generator: Generator::Command("npm create vite@latest {name} -- --template solid-ts"),
        requires: NODE,
        interactive: true,
        post_install: &[],
        next_steps: VITE_NEXT_STEPS,
    },
    StackDescriptor {
        id: "astro",
        display_name: "Astro",
        category: Category::Frontend,
        language: "javascript",
        generator: Generator::Command("npm create astro@latest {name}"),
        requires: NODE,
        interactive: true,
        post_install: &[],
        next_steps: &["cd {name}", "npm run dev"],
    },
    StackDescriptor {
        id: "angular",
        display_name: "Angular",
        category: Category::Frontend,
        language: "typescript",
        generator: Generator::Command("npx @angular/cli new {name}"),
        requires: NODE,
        interactive: true,
        post_install: &[],
        next_steps: &["cd {name}", "npm start"],
    },
    // API
    StackDescriptor {
        id: "express",
        display_name: "Express.js",
        category: Category::Api,
        language: "javascript",
        generator: Generator::Command("npx express-generator {name} --view=ejs --git"),
        requires: NODE,
        interactive: false,
        post_install: EXPRESS_ENV_EXAMPLE,
        next_steps: &["cd {name}", "npm install", "npm start"],
    },
    StackDescriptor {
        id: "express-ts",
        display_name: "Express + TypeScript",
        category: Category::Api,
        language: "typescript",
        generator: Generator::Custom(custom::express_ts),
        requires: NODE,
        interactive: false,
        post_install: &[],
        next_steps: NODE_API_NEXT_STEPS,
    },
    StackDescriptor {
        id: "nestjs",
        display_name: "NestJS",
        category: Category::Api,
        language: "typescript",
        generator: Generator::Command("npx @nestjs/cli new {name}"),
        requires: NODE,
        interactive: true,
        post_install: &[],
        next_steps: &["cd {name}", "npm run start:dev"],
    },
    StackDescriptor {
        id: "fastapi",
        display_name: "FastAPI",
        category: Category::Api,
        language: "python",
        generator: Generator::Custom(custom::fastapi),
        requires: PYTHON,
        interactive: false,
        post_install: &[],
        next_steps: &[
            "cd {name}",
            "python3 -m venv venv",
            "source venv/bin/activate",
            "pip install -r requirements.txt",
            "uvicorn main:app --reload",
        ],
    },
    StackDescriptor {
        id: "flask",
        display_name: "Flask",
        category: Category::Api,
        language: "python",
        generator: Generator::Custom(custom::flask),
        requires: PYTHON,
        interactive: false,
        post_install: &[],
        next_steps: &[
            "cd {name}",
            "python3 -m venv venv",
            "source venv/bin/activate",
            "pip install -r requirements.txt",
            "python app.py",
        ],
    },
    StackDescriptor {
        id: "django-drf",
        display_name: "Django REST Framework",
        category: Category::Api,
        language: "python",
        generator: Generator::Custom(custom::django_drf),
        requires: PYTHON,
        interactive: false,
        post_install: &[],
        next_steps: &[
            "cd {name}",
            "python3 -m venv venv",
            "source venv/bin/activate",
            "pip install -r requirements.txt",
            "django-admin startproject config .",
            "python manage.py runserver",
        ],
    },
    StackDescriptor {
        id: "go-gin",
        display_name: "Go (Gin)",
        category: Category::Api,
        language: "go",
        generator: Generator::Custom(custom::go_gin),
        requires: GO,
        interactive: false,
        post_install: &[],
        next_steps: GO_API_NEXT_STEPS,
    },
    StackDescriptor {
        id: "go-fiber",
        display_name: "Go (Fiber)",
        category: Category::Api,
        language: "go",
        generator: Generator::Custom(custom::go_fiber),
        requires: GO,
        interactive: false,
        post_install: &[],
        next_steps: GO_API_NEXT_STEPS,
    },
    StackDescriptor {
        id: "go-echo",
        display_name: "Go (Echo)",
        category: Category::Api,
        language: "go",
        generator: Generator::Custom(custom::go_echo),
        requires: GO,
        interactive: false,
        post_install: &[],
        next_steps: GO_API_NEXT_STEPS,
    },
    StackDescriptor {
        id: "rust-axum",
        display_name: "Rust (Axum)",
        category: Category::Api,
        language: "rust",
        generator: Generator::Custom(custom::rust_axum),
        requires: RUST,
        interactive: false,
        post_install: &[],
        next_steps: RUST_API_NEXT_STEPS,
    },
    StackDescriptor {
        id: "rust-actix",
        display_name: "Rust (Actix-web)",
        category: Category::Api,
        language: "rust",
        generator: Generator::Custom(custom::rust_actix),
        requires: RUST,
        interactive: false,
        post_install: &[],
        next_steps: RUST_API_NEXT_STEPS,
    },
    StackDescriptor {
        id: "rails-api",
        display_name: "Ruby on Rails (API)",
        category: Category::Api,
        language: "ruby",
        generator: Generator::Command("rails new {name} --api"),
        requires: RAILS,
        interactive: false,
        post_install: &[],
        next_steps: &["cd {name}", "bin/rails db:prepare", "bin/rails server"],
    },
    // Full-stack frameworks
    StackDescriptor {
        id: "django",
        display_name: "Django",
        category: Category::Framework,
        language: "python",
        generator: Generator::Command("django-admin startproject {name}"),
        requires: &["python3", "django-admin"],
        interactive: false,
        post_install: DJANGO_REQUIREMENTS,
        next_steps: &[
            "cd {name}",
            "python3 -m venv venv",
            "source venv/bin/activate",
            "python manage.py migrate",
            "python manage.py runserver",
        ],
    },
    StackDescriptor {
        id: "laravel",
        display_name: "Laravel",
        category: Category::Framework,
        language: "php",
        generator: Generator::Command("composer create-project laravel/laravel {name}"),
        requires: &["composer", "php"],
        interactive: false,
        post_install: &[],
        next_steps: &["cd {name}", "php artisan serve"],
    },
    StackDescriptor {
        id: "rails",
        display_name: "Ruby on Rails",
        category: Category::Framework,
        language: "ruby",
        generator: Generator::Command("rails new {name}"),
        requires: RAILS,
        interactive: false,
        post_install: &[],
        next_steps: &["cd {name}", "bin/rails db:prepare", "bin/rails server"],
    },
    StackDescriptor {
        id: "sveltekit",
        display_name: "SvelteKit",
        category: Category::Framework,
        language: "javascript",
        generator: Generator::Command("npx sv create {name}"),
        requires: NODE,
        interactive: true,
        post_install: &[],
        next_steps: VITE_NEXT_STEPS,
    },
    // CLI applications
    StackDescriptor {
        id: "python-cli-typer",
        display_name: "Python CLI (Typer)",
        category: Category::Cli,
        language: "python",
        generator: Generator::Custom(custom::python_cli_typer),
        requires: PYTHON,
        interactive: false,
        post_install: &[],
        next_steps: PYTHON_VENV_NEXT_STEPS,
    },
    StackDescriptor {
        id: "python-cli-click",
        display_name: "Python CLI (Click)",
        category: Category::Cli,
        language: "python",
        generator: Generator::Custom(custom::python_cli_click),
        requires: PYTHON,
        interactive: false,
        post_install: &[],
        next_steps: PYTHON_VENV_NEXT_STEPS,
    },
    StackDescriptor {
        id: "node-cli",
        display_name: "Node.js CLI",
        category: Category::Cli,
        language: "javascript",
        generator: Generator::Custom(custom::node_cli),
        requires: NODE,
        interactive: false,
        post_install: &[],
        next_steps: &["cd {name}", "npm install", "node cli.js hello"],
    },
    StackDescriptor {
        id: "node-cli-ts",
        display_name: "Node.js CLI (TypeScript)",
        category: Category::Cli,
        language: "typescript",
        generator: Generator::Custom(custom::node_cli_ts),
        requires: NODE,
        interactive: false,
        post_install: &[],
        next_steps: &["cd {name}", "npm install", "npm run dev -- hello"],
    },
    StackDescriptor {
        id: "go-cli-cobra",
        display_name: "Go CLI (Cobra)",
        category: Category::Cli,
        language: "go",
        generator: Generator::Custom(custom::go_cli_cobra),
        requires: GO,
        interactive: false,
        post_install: &[],
        next_steps: &["cd {name}", "go mod tidy", "go run main.go hello"],
    },
    StackDescriptor {
        id: "rust-cli-clap",
        display_name: "Rust CLI (Clap)",
        category: Category::Cli,
        language: "rust",
        generator: Generator::Custom(custom::rust_cli_clap),
        requires: RUST,
        interactive: false,
        post_install: &[],
        next_steps: &["cd {name}", "cargo run -- hello"],
    },
];

/// Look up a stack by id.
pub fn find_stack(id: &str) -> Option<&'static StackDescriptor> {
    STACKS.iter().find(|s| s.id == id)
}

/// Stacks in one category, in catalog order.
pub fn by_category(category: Category) -> impl Iterator<Item = &'static StackDescriptor> {
    STACKS.iter().filter(move |s| s.category == category)
}

/// All stack ids in catalog order.
pub fn stack_ids() -> Vec<&'static str> {
    STACKS.iter().map(|s| s.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::tools::is_known_tool;
    use crate::stacks::custom::template_names;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let ids = stack_ids();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn requirements_are_known_tools() {
        for stack in STACKS {
            assert!(!stack.requires.is_empty(), "{} requires nothing", stack.id);
            for tool in stack.requires {
                assert!(is_known_tool(tool), "{} requires unknown {}", stack.id, tool);
            }
        }
    }

    #[test]
    fn command_templates_name_the_project() {
        for stack in STACKS {
            if let Generator::Command(template) = stack.generator {
                assert!(template.contains("{name}"), "{}", stack.id);
            }
        }
    }

    #[test]
    fn every_category_has_stacks() {
        for category in Category::ALL {
            assert!(by_category(category).next().is_some(), "{}", category);
        }
    }

    #[test]
    fn builtin_stacks_match_embedded_templates() {
        let builtin: HashSet<&str> = STACKS.iter().filter(|s| s.is_custom()).map(|s| s.id).collect();
        let templates: HashSet<&str> = template_names().into_iter().collect();
        assert_eq!(builtin, templates);
    }

    #[test]
    fn next_steps_start_with_cd() {
        for stack in STACKS {
            assert_eq!(stack.next_steps.first(), Some(&"cd {name}"), "{}", stack.id);
        }
    }

    #[test]
    fn find_stack_by_id() {
        let stack = find_stack("react-vite").unwrap();
        assert_eq!(stack.display_name, "React (Vite)");
        assert!(stack.interactive);
        assert!(find_stack("nope").is_none());
    }

    #[test]
    fn react_vite_command() {
        let argv = find_stack("react-vite").unwrap().command_line("demo-app").unwrap();
        assert_eq!(&argv[..4], &["npm", "create", "vite@latest", "demo-app"]);
    }
}
