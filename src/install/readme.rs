//! Root README for monorepo projects.

use crate::stacks::StackDescriptor;

/// Directory holding the frontend of a monorepo.
pub const FRONTEND_DIR: &str = "web";

/// Directory holding the backend of a monorepo.
pub const BACKEND_DIR: &str = "api";

/// Render the root `README.md` describing both halves of a monorepo.
pub fn monorepo_readme(
    name: &str,
    frontend: &StackDescriptor,
    backend: &StackDescriptor,
) -> String {
    format!(
        r#"# {name}

Monorepo created with Scaffold CLI.

## Structure

```
{name}/
├── {web}/    # {frontend}
└── {api}/    # {backend}
```

## Getting Started

### Frontend

```bash
cd {web}
npm install
npm run dev
```

### Backend

```bash
cd {api}
# Follow the instructions in {api}/README.md
```

## Development

Run both halves side by side in separate terminals.

- Frontend: port 5173 (Vite) or 3000 (Next.js) by default
- Backend: point the frontend at the API URL it prints on startup

## Scripts

Add these to a root `package.json` to run both halves from here:

```json
{{
  "scripts": {{
    "dev:web": "cd {web} && npm run dev",
    "dev:api": "cd {api} && <start command>"
  }}
}}
```
"#,
        name = name,
        web = FRONTEND_DIR,
        api = BACKEND_DIR,
        frontend = frontend.display_name,
        backend = backend.display_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stacks::find_stack;

    #[test]
    fn readme_names_both_halves() {
        let readme = monorepo_readme(
            "shop",
            find_stack("react-vite").unwrap(),
            find_stack("fastapi").unwrap(),
        );

        assert!(readme.starts_with("# shop\n"));
        assert!(readme.contains("Monorepo created with Scaffold CLI."));
        assert!(readme.contains("├── web/"));
        assert!(readme.contains("└── api/"));
        assert!(readme.contains("\"dev:web\": \"cd web && npm run dev\""));
        assert!(!readme.contains("{name}"));
    }
}
