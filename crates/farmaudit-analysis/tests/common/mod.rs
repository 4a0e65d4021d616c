//! Shared fixtures: a throwaway project tree in a temp dir.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use farmaudit_core::config::ResolvedPaths;
use farmaudit_core::{AuditConfig, FarmauditConfig};
use tempfile::TempDir;

pub const SCHEMA_SQL: &str = r#"-- myfarmstand schema
CREATE TABLE IF NOT EXISTS public.products (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    price DECIMAL(10, 2) NOT NULL,
    pre_order_deadline TIMESTAMPTZ,
    pre_order_available_date TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE orders (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL,
    status TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    CONSTRAINT status_check CHECK (status IN ('pending', 'ready'))
);
"#;

/// Follows every convention; audits at 100.
pub const GOLDEN_SERVICE: &str = r#"import { supabase } from '../config/supabase';
import { createBroadcastHelper } from '../utils/broadcastFactory';

interface CartItem {
  id: string;
}

/**
 * Cart access.
 */
export async function getCart(userId: string) {
  try {
    const { data, error } = await supabase.from('cart').select('*').eq('owner', userId);
    if (error) throw error;
    return { success: true, data };
  } catch (error) {
    console.error('getCart failed', error);
    return { success: false, error };
  }
}
"#;

/// No try/catch, no broadcast, bare return, one console.log, no supabase.
pub const WEAK_SERVICE: &str = r#"import { db } from '../config/db';

interface Product {
  id: string;
  name: string;
}

/**
 * Product catalogue access.
 */
export async function getProducts(): Promise<Product[]> {
  console.log('getProducts');
  const data = await db.query('products');
  return data;
}
"#;

/// Clean patterns but three raw `created_at` reads.
pub const ORDER_SERVICE: &str = r#"import { supabase } from '../config/supabase';
import { createBroadcastHelper } from '../utils/broadcastFactory';

interface OrderRow {
  id: string;
}

/** Order access. */
export async function getOrderDates(id: string) {
  try {
    const { data } = await supabase.from('orders').select('*').eq('id', id).single();
    console.log('fetched', data.created_at);
    const first = data.created_at;
    return { success: true, data: [first, data.created_at] };
  } catch (error) {
    console.error('getOrderDates failed', error);
    return { success: false, error };
  }
}
"#;

/// Reads the deprecated pre-order column and never broadcasts.
pub const PREORDER_SERVICE: &str = r#"import { supabase } from '../config/supabase';

interface PreOrder {
  id: string;
}

/** Pre-order helpers. */
export async function getDeadline(id: string) {
  try {
    const { data } = await supabase.from('products').select('*').eq('id', id).single();
    return { success: true, data: data.pre_order_deadline };
  } catch (error) {
    console.error('getDeadline failed', error);
    return { success: false, error };
  }
}
"#;

pub const CART_HOOK: &str = r#"import { useQuery, useMutation, useQueryClient } from '@tanstack/react-query';

interface CartState {
  items: string[];
}

/** Cart state hook. */
export const useCart = () => {
  const queryClient = useQueryClient();
  const query = useQuery({ queryKey: ['cart'], queryFn: fetchCart });
  const mutation = useMutation({
    mutationFn: addToCart,
    onMutate: async () => {},
    onError: () => {},
    onSuccess: () => queryClient.invalidateQueries({ queryKey: ['cart'] }),
  });
  return {
    items: query.data,
    isLoading: query.isLoading,
    addItem: mutation.mutate,
  };
};
"#;

pub struct Project {
    pub dir: TempDir,
}

impl Project {
    /// Empty project with the schema in place.
    pub fn new() -> Self {
        let project = Self {
            dir: TempDir::new().unwrap(),
        };
        project.write("database/schema.sql", SCHEMA_SQL);
        std::fs::create_dir_all(project.root().join("src/services")).unwrap();
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path(rel)).unwrap()
    }

    pub fn audit_config(&self, services: &[&str], hooks: &[&str]) -> AuditConfig {
        AuditConfig {
            golden_pattern: Some(self.path("src/services/cartService.ts")),
            services: services.iter().map(|s| self.path(s)).collect(),
            hooks: hooks.iter().map(|h| self.path(h)).collect(),
            ..AuditConfig::default()
        }
    }

    pub fn paths(&self) -> ResolvedPaths {
        FarmauditConfig::default().resolve_paths(self.root())
    }

    /// Files in `rel` (non-recursive) whose names start with `prefix`.
    pub fn files_with_prefix(&self, rel: &str, prefix: &str) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(self.path(rel)) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(prefix))
            })
            .collect();
        files.sort();
        files
    }
}
